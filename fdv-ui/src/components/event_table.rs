//! Paged flood event table with single-row radio selection.

use crate::state::AppState;
use dioxus::prelude::*;
use fdv_dashboard::DashboardEvent;

const HEADER_STYLE: &str = "position: sticky; top: 0; background: rgb(173, 216, 230); color: black; text-align: center; font-weight: bold; font-size: 12px; padding: 4px; border-radius: 4px;";
const CELL_STYLE: &str = "text-align: left; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; max-width: 0; padding: 2px 4px;";
/// Relative widths of the date, duration and cause columns; the rest share what is left.
const COLUMN_WIDTHS: [&str; 6] = ["10%", "10%", "7%", "15%", "", ""];

fn stripe_style(row: usize) -> &'static str {
    if row % 2 == 1 {
        "background: rgb(220, 220, 220);"
    } else {
        "background: white;"
    }
}

#[component]
pub fn EventTable() -> Element {
    let mut state = use_context::<AppState>();
    let requested_page = (state.page)();
    let snapshot = state.tree.read().as_ref().map(|tree| {
        let table = &tree.table;
        let page_count = table.page_count();
        let page = requested_page.min(page_count - 1);
        (
            table.columns.clone(),
            table.page(page).to_vec(),
            table.selected_rows.clone(),
            page,
            page * table.page_size,
            page_count,
            table.rows.len(),
        )
    });
    let Some((columns, rows, selected, page, offset, page_count, total)) = snapshot else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "datatable-container",
            style: "flex: 1; min-width: 0;",
            div {
                style: "height: 500px; overflow-y: auto;",
                table {
                    id: "datatable-interactivity",
                    style: "width: 100%; border-collapse: collapse; table-layout: fixed; font-size: 12px; font-family: system-ui;",
                    thead {
                        tr {
                            th { style: "{HEADER_STYLE} width: 32px;" }
                            for (column, width) in columns.iter().zip(COLUMN_WIDTHS) {
                                th {
                                    key: "{column.id}",
                                    style: "{HEADER_STYLE} width: {width};",
                                    "{column.name}"
                                }
                            }
                        }
                    }
                    tbody {
                        for (i, row) in rows.into_iter().enumerate() {
                            tr {
                                key: "{row.event_index}",
                                style: stripe_style(i),
                                td {
                                    style: "text-align: center;",
                                    input {
                                        r#type: "radio",
                                        name: "event-row",
                                        checked: selected.contains(&(offset + i)),
                                        onchange: move |_| state.dispatch(DashboardEvent::RowSelected(vec![offset + i])),
                                    }
                                }
                                for cell in row.cells.iter() {
                                    td { style: CELL_STYLE, title: "{cell}", "{cell}" }
                                }
                            }
                        }
                    }
                }
            }
            div {
                style: "display: flex; gap: 8px; align-items: center; justify-content: flex-end; margin-top: 6px; font-size: 12px;",
                button {
                    disabled: page == 0,
                    onclick: move |_| state.page.set(page.saturating_sub(1)),
                    "<"
                }
                span { "Page {page + 1} of {page_count} ({total} events)" }
                button {
                    disabled: page + 1 >= page_count,
                    onclick: move |_| state.page.set(page + 1),
                    ">"
                }
            }
        }
    }
}
