use dioxus::prelude::*;

/// Open/closed state shared by the sidebar and its trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidebarState {
    pub open: bool,
}

/// Provides sidebar state to the shell below it.
#[component]
pub fn SidebarProvider(#[props(default = true)] default_open: bool, children: Element) -> Element {
    let state = use_signal(|| SidebarState { open: default_open });
    use_context_provider(|| state);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            class: "sidebar-provider",
            "data-sidebar-open": if (state)().open { "true" } else { "false" },
            {children}
        }
    }
}

fn use_sidebar() -> Signal<SidebarState> {
    use_context::<Signal<SidebarState>>()
}

/// Navigation column. On narrow viewports a backdrop closes it.
#[component]
pub fn Sidebar(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let mut state = use_sidebar();
    let is_open = (state)().open;

    let base = vec![
        Attribute::new("class", "sidebar", None, false),
        Attribute::new(
            "data-state",
            if is_open { "open" } else { "closed" },
            None,
            false,
        ),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        if is_open {
            div {
                class: "sidebar-backdrop",
                onclick: move |_| state.set(SidebarState { open: false }),
            }
        }
        aside {
            ..merged,
            {children}
        }
    }
}

#[component]
pub fn SidebarHeader(children: Element) -> Element {
    rsx! {
        div { class: "sidebar-header", {children} }
    }
}

#[component]
pub fn SidebarContent(children: Element) -> Element {
    rsx! {
        nav { class: "sidebar-content", {children} }
    }
}

#[component]
pub fn SidebarFooter(children: Element) -> Element {
    rsx! {
        div { class: "sidebar-footer", {children} }
    }
}

#[component]
pub fn SidebarGroup(label: String, children: Element) -> Element {
    rsx! {
        div { class: "sidebar-group",
            if !label.is_empty() {
                div { class: "sidebar-group-label", "{label}" }
            }
            ul { class: "sidebar-menu", {children} }
        }
    }
}

/// One navigation link. Following it closes the sidebar on narrow viewports.
#[component]
pub fn SidebarMenuLink(
    href: String,
    #[props(default = false)] active: bool,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let mut state = use_sidebar();

    let base = vec![
        Attribute::new("class", "sidebar-menu-link", None, false),
        Attribute::new(
            "data-active",
            if active { "true" } else { "false" },
            None,
            false,
        ),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        li { class: "sidebar-menu-item",
            a {
                href: "{href}",
                "aria-current": if active { "page" } else { "false" },
                onclick: move |_| state.set(SidebarState { open: false }),
                ..merged,
                {children}
            }
        }
    }
}

/// Button that toggles the sidebar.
#[component]
pub fn SidebarTrigger(children: Element) -> Element {
    let mut state = use_sidebar();

    rsx! {
        button {
            class: "sidebar-trigger",
            r#type: "button",
            "aria-label": "Toggle sidebar",
            onclick: move |_| {
                let current = (state)().open;
                state.set(SidebarState { open: !current });
            },
            {children}
        }
    }
}

/// Main column next to the sidebar.
#[component]
pub fn SidebarInset(children: Element) -> Element {
    rsx! {
        div { class: "sidebar-inset", {children} }
    }
}
