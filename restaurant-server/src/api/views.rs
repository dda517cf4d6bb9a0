//! View types handed to the templates
//!
//! Records are converted into display-ready structs here so templates only
//! print strings.

use shared::{MenuItem, Order};

use crate::i18n::Lang;

/// URL prefix of uploaded menu images (served from `<static_dir>/images/menu`)
pub const MENU_IMAGE_URL_PREFIX: &str = "/static/images/menu";

/// Price with two decimals, comma separator in Finnish
pub fn format_price(price: f64, lang: Lang) -> String {
    let text = format!("{:.2} €", price);
    match lang {
        Lang::Fi => text.replace('.', ","),
        Lang::En => text,
    }
}

pub fn image_url(image: &str) -> Option<String> {
    (!image.is_empty()).then(|| format!("{}/{}", MENU_IMAGE_URL_PREFIX, image))
}

#[derive(Debug, Clone)]
pub struct MenuItemView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub image_url: Option<String>,
}

impl MenuItemView {
    pub fn from_item(item: &MenuItem, lang: Lang) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            description: item.description.clone(),
            price: format_price(item.price, lang),
            image_url: image_url(&item.image),
        }
    }
}

/// Menu items of one category, in display order
#[derive(Debug, Clone)]
pub struct MenuSection {
    pub category: String,
    pub items: Vec<MenuItemView>,
}

/// Group items (already sorted by category) into consecutive sections
pub fn group_by_category(items: &[MenuItem], lang: Lang) -> Vec<MenuSection> {
    let mut sections: Vec<MenuSection> = Vec::new();
    for item in items {
        let view = MenuItemView::from_item(item, lang);
        match sections.last_mut() {
            Some(section) if section.category == item.category => section.items.push(view),
            _ => sections.push(MenuSection {
                category: item.category.clone(),
                items: vec![view],
            }),
        }
    }
    sections
}

/// Order row with its status translated
#[derive(Debug, Clone)]
pub struct OrderView {
    pub order: Order,
    pub status_key: String,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        let status_key = format!("status_{}", order.status);
        Self { order, status_key }
    }
}
