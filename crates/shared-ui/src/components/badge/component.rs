use dioxus::prelude::*;

/// Visual tone for badges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BadgeVariant {
    #[default]
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

impl BadgeVariant {
    fn class(&self) -> &'static str {
        match self {
            BadgeVariant::Neutral => "neutral",
            BadgeVariant::Info => "info",
            BadgeVariant::Success => "success",
            BadgeVariant::Warning => "warning",
            BadgeVariant::Danger => "danger",
        }
    }

    /// Tone for a workflow status string (`pending`, `approved`, `selected`, ...).
    pub fn for_status(status: &str) -> Self {
        match status {
            "approved" | "selected" => BadgeVariant::Success,
            "pending" | "applied" => BadgeVariant::Warning,
            "shortlisted" => BadgeVariant::Info,
            "rejected" => BadgeVariant::Danger,
            _ => BadgeVariant::Neutral,
        }
    }
}

/// Inline label for roles and statuses.
#[component]
pub fn Badge(
    #[props(default)] variant: BadgeVariant,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![
        Attribute::new("class", "badge", None, false),
        Attribute::new("data-tone", variant.class(), None, false),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        span {
            ..merged,
            {children}
        }
    }
}

/// Badge whose tone follows a workflow status.
#[component]
pub fn StatusBadge(status: String) -> Element {
    let variant = BadgeVariant::for_status(&status);
    rsx! {
        Badge { variant, "{status}" }
    }
}
