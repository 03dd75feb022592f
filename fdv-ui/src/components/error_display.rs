//! Error box shown when the dashboard cannot start or input is rejected.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    #[props(default = "Error".to_string())]
    pub title: String,
    /// Smaller inline variant for form validation messages
    #[props(default = false)]
    pub compact: bool,
}

#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    let padding = if props.compact { "4px 8px" } else { "12px 16px" };
    rsx! {
        div {
            role: "alert",
            style: "padding: {padding}; margin: 8px 0; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A; font-size: 13px;",
            strong { "{props.title}: " }
            "{props.message}"
        }
    }
}
