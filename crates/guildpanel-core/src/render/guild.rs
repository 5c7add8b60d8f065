use maud::{Markup, html};

use crate::model::ShopItem;
use crate::render::truncate_chars;

const KB_PREVIEW_CHARS: usize = 80;

pub fn shop_items(items: &[ShopItem]) -> String {
    shop_items_markup(items).into_string()
}

fn shop_items_markup(items: &[ShopItem]) -> Markup {
    html! {
        @if items.is_empty() {
            tr { td colspan="4" class="text-center text-muted" { "The shop is empty." } }
        } @else {
            @for item in items {
                tr data-entity-id=(item.item_slug) {
                    td { (item.name) }
                    td { (item.price) }
                    td { (stock_text(item.stock)) }
                    td {
                        div class="btn-group" {
                            button class="btn btn-primary btn-sm"
                                data-bs-toggle="modal"
                                data-bs-target="#editItemModal"
                                data-item-data=(serde_json::to_string(item).unwrap_or_default()) {
                                "Edit"
                            }
                            button class="btn btn-danger btn-sm action-btn"
                                data-action="shop/action"
                                data-target-id=(item.item_slug)
                                data-sub-action="delete" {
                                "Delete"
                            }
                        }
                    }
                }
            }
        }
    }
}

fn stock_text(stock: i64) -> String {
    if stock == -1 {
        "Unlimited".to_string()
    } else {
        stock.to_string()
    }
}

pub fn knowledge_base(entries: &[String]) -> String {
    html! {
        @if entries.is_empty() {
            li class="list-group-item text-muted" { "The knowledge base is empty." }
        } @else {
            @for (index, entry) in entries.iter().enumerate() {
                @let position = index + 1;
                @let (preview, truncated) = truncate_chars(entry, KB_PREVIEW_CHARS);
                li class="list-group-item d-flex justify-content-between align-items-center" data-entity-id=(position) {
                    span class="kb-entry-text" title=(entry) {
                        (preview)
                        @if truncated { "..." }
                    }
                    button class="btn btn-danger btn-sm action-btn"
                        data-action="data/kb"
                        data-target-id=(position)
                        data-sub-action="remove" {
                        i class="fa-solid fa-trash" {}
                    }
                }
            }
        }
    }
    .into_string()
}

/// Keyword/answer pairs as a Bootstrap accordion; answer newlines become `<br>`.
pub fn faq(entries: &[(String, String)]) -> String {
    html! {
        @if entries.is_empty() {
            p class="text-muted mt-2" { "The FAQ is empty." }
        } @else {
            @for (index, (keyword, answer)) in entries.iter().enumerate() {
                div class="accordion-item" data-entity-id=(keyword) {
                    h2 class="accordion-header" {
                        button class="accordion-button collapsed" type="button"
                            data-bs-toggle="collapse"
                            data-bs-target=(format!("#faq-{index}")) {
                            strong { (keyword) }
                        }
                    }
                    div id=(format!("faq-{index}")) class="accordion-collapse collapse" data-bs-parent="#faq-accordion" {
                        div class="accordion-body" {
                            p {
                                @for (line_no, line) in answer.split('\n').enumerate() {
                                    @if line_no > 0 { br; }
                                    (line)
                                }
                            }
                            hr;
                            button class="btn btn-danger btn-sm action-btn"
                                data-action="data/faq"
                                data-target-id=(keyword)
                                data-sub-action="remove" {
                                "Delete"
                            }
                        }
                    }
                }
            }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(slug: &str, name: &str, stock: i64) -> ShopItem {
        ShopItem {
            item_slug: slug.to_string(),
            name: name.to_string(),
            price: 100,
            stock,
            description: None,
            role_id: None,
            purchase_message: None,
        }
    }

    #[test]
    fn shop_rows_carry_entity_and_delete_action() {
        let html = shop_items(&[item("sword", "Sword", -1)]);
        assert!(html.contains(r#"data-entity-id="sword""#));
        assert!(html.contains(r#"data-action="shop/action""#));
        assert!(html.contains(r#"data-sub-action="delete""#));
        assert!(html.contains("Unlimited"));
        assert!(html.contains("data-item-data=\"{&quot;item_slug&quot;:&quot;sword&quot;"));
    }

    #[test]
    fn shop_names_are_escaped() {
        let html = shop_items(&[item("x", "<script>alert(1)</script>", 3)]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn empty_shop_shows_placeholder() {
        assert!(shop_items(&[]).contains("The shop is empty."));
    }

    #[test]
    fn kb_entries_are_numbered_and_truncated() {
        let long = "a".repeat(100);
        let html = knowledge_base(&["short <b>".to_string(), long]);
        assert!(html.contains(r#"data-entity-id="1""#));
        assert!(html.contains(r#"data-target-id="2""#));
        assert!(html.contains("short &lt;b&gt;"));
        assert!(html.contains(&format!("{}...", "a".repeat(80))));
    }

    #[test]
    fn faq_answers_break_lines_without_trusting_markup() {
        let html = faq(&[(
            "hours".to_string(),
            "Mon-Fri\n<img src=x onerror=alert(1)>".to_string(),
        )]);
        assert!(html.contains("Mon-Fri<br>&lt;img"));
        assert!(html.contains(r##"data-bs-target="#faq-0""##));
        assert!(html.contains(r#"data-entity-id="hours""#));
    }
}
