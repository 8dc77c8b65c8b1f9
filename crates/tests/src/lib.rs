#[cfg(test)]
mod common;

#[cfg(test)]
mod session_tests;

#[cfg(test)]
mod gate_tests;

#[cfg(test)]
mod profile_tests;

#[cfg(test)]
mod directory_tests;

#[cfg(test)]
mod noc_tests;

#[cfg(test)]
mod application_tests;

#[cfg(test)]
mod overview_tests;

#[cfg(test)]
mod health_tests;
