//! Top navigation bar.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct NavbarProps {
    pub title: String,
}

#[component]
pub fn Navbar(props: NavbarProps) -> Element {
    rsx! {
        div {
            class: "navbar",
            style: "padding: 12px 16px; margin-bottom: 12px; background: #1F3A5F; color: white;",
            div {
                class: "navbar-brand",
                style: "font-size: 20px; font-weight: bold; letter-spacing: 1px;",
                "{props.title}"
            }
        }
    }
}
