//! Page handlers.
//!
//! Pages return view models as JSON; markup is left to the renderer. Every
//! handler reads the locale bound by the gateway and uses it for string
//! lookup, link generation and the backend `Accept-Language`.

use crate::backend::BackendClient;
use crate::error::{Result, StorefrontError};
use crate::gateway::ResolvedLocale;
use crate::i18n::Locale;
use crate::models::{CreateOrderRequest, OrderResponse, PaymentMethod, Product};
use crate::server::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Menu categories the backend can filter by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    MilkTea,
    FruitTea,
    Coffee,
    Chicken,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::MilkTea,
        Category::FruitTea,
        Category::Coffee,
        Category::Chicken,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Category::MilkTea => "milk_tea",
            Category::FruitTea => "fruit_tea",
            Category::Coffee => "coffee",
            Category::Chicken => "chicken",
        }
    }

    fn tab_label_key(&self) -> &'static str {
        match self {
            Category::MilkTea => "tabMilkTea",
            Category::FruitTea => "tabFruitTea",
            Category::Coffee => "tabCoffee",
            Category::Chicken => "tabChicken",
        }
    }
}

/// Parse a `category` query value. Unknown values mean "all categories".
pub fn normalize_category(input: Option<&str>) -> Option<Category> {
    let value = input.unwrap_or("").trim().to_lowercase();
    Category::ALL.into_iter().find(|c| c.key() == value)
}

/// Lower-cased, trimmed search query; `None` when blank.
pub fn normalize_query(input: Option<&str>) -> Option<String> {
    let value = input.unwrap_or("").trim().to_lowercase();
    (!value.is_empty()).then_some(value)
}

fn backend(state: &AppState) -> Result<&BackendClient> {
    state
        .backend
        .as_ref()
        .ok_or(StorefrontError::MissingConfiguration("API_URL"))
}

// ==================== View Models ====================

#[derive(Debug, Serialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Serialize)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub best_seller: Option<String>,
}

impl ProductCard {
    fn new(product: Product, best_seller_label: &str) -> Self {
        Self {
            best_seller: product.best_seller.then(|| best_seller_label.to_string()),
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryCard {
    pub key: &'static str,
    pub title: String,
    pub description: String,
    pub href: String,
}

#[derive(Debug, Serialize)]
pub struct Tab {
    pub label: String,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct PreviewItem {
    pub name: String,
    pub price: &'static str,
}

/// The "popular today" card next to the hero.
#[derive(Debug, Serialize)]
pub struct PopularCard {
    pub title: String,
    pub tag: String,
    pub items: Vec<PreviewItem>,
    pub eta_label: String,
    pub eta_value: String,
}

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub locale: Locale,
    /// One entry per supported locale; the current one is active
    pub locales: Vec<Tab>,
    pub brand: String,
    pub badge: String,
    pub badge2: String,
    pub hero_title: String,
    pub hero_title2: String,
    pub hero_subtitle: String,
    pub perks: Vec<String>,
    pub popular: PopularCard,
    pub menu: Link,
    pub order: Link,
    pub categories_title: String,
    pub categories_subtitle: String,
    pub categories: Vec<CategoryCard>,
    pub explore: String,
    pub best_sellers_title: String,
    pub best_sellers_subtitle: String,
    pub see_all: Link,
    pub best_sellers: Vec<ProductCard>,
}

#[derive(Debug, Serialize)]
pub struct SearchForm {
    pub action: String,
    pub placeholder: String,
    pub submit: String,
    pub query: String,
    pub category: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct EmptyState {
    pub title: String,
    pub subtitle: String,
    pub reset: Link,
}

#[derive(Debug, Serialize)]
pub struct MenuPage {
    pub locale: Locale,
    pub title: String,
    pub subtitle: String,
    pub checkout: Link,
    pub tabs: Vec<Tab>,
    pub search: SearchForm,
    pub add_to_cart: String,
    pub details: String,
    pub products: Vec<ProductCard>,
    pub empty: Option<EmptyState>,
}

#[derive(Debug, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct PaymentOption {
    pub method: PaymentMethod,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutPage {
    pub locale: Locale,
    pub title: String,
    pub subtitle: String,
    pub action: String,
    pub fields: Vec<FormField>,
    pub payment_label: String,
    pub payment_methods: Vec<PaymentOption>,
    pub submit: String,
    pub back: Link,
}

// ==================== Handlers ====================

/// Best sellers for the home page. The page renders without them when the
/// backend is unset or failing.
async fn load_best_sellers(state: &AppState, locale: Locale, label: &str) -> Vec<ProductCard> {
    let Some(client) = state.backend.as_ref() else {
        return Vec::new();
    };

    match client.fetch_best_sellers(locale, None).await {
        Ok(products) => products
            .into_iter()
            .map(|p| ProductCard::new(p, label))
            .collect(),
        Err(e) => {
            warn!(
                error = %e,
                locale = %locale,
                "Best sellers unavailable, rendering home without them"
            );
            Vec::new()
        }
    }
}

/// `GET /{locale}`
pub async fn home(
    State(state): State<AppState>,
    ResolvedLocale(locale): ResolvedLocale,
) -> Json<HomePage> {
    let t = state.messages.scope(locale, "home");

    let best_seller_label = t.t("bestSellerTag");
    let best_sellers = load_best_sellers(&state, locale, &best_seller_label).await;

    let locales = state
        .locales
        .supported()
        .iter()
        .map(|l| Tab {
            label: l.native_name().to_string(),
            href: l.href("/"),
            active: *l == locale,
        })
        .collect();

    let categories = [
        (Category::MilkTea, "catBubbleTea", "catBubbleTeaDesc"),
        (Category::Coffee, "catCoffee", "catCoffeeDesc"),
        (Category::Chicken, "catChicken", "catChickenDesc"),
    ]
    .into_iter()
    .map(|(category, title, description)| CategoryCard {
        key: category.key(),
        title: t.t(title),
        description: t.t(description),
        href: locale.href(&format!("/menu?category={}", category.key())),
    })
    .collect();

    let items = [("item1", "5.20 €"), ("item2", "4.50 €"), ("item3", "6.90 €")]
        .into_iter()
        .map(|(key, price)| PreviewItem {
            name: t.t(key),
            price,
        })
        .collect();

    Json(HomePage {
        locale,
        locales,
        brand: t.t("brand"),
        badge: t.t("badge"),
        badge2: t.t("badge2"),
        hero_title: t.t("heroTitle"),
        hero_title2: t.t("heroTitle2"),
        hero_subtitle: t.t("heroSubtitle"),
        perks: ["perkFast", "perkGuest", "perkPayment"]
            .into_iter()
            .map(|key| t.t(key))
            .collect(),
        popular: PopularCard {
            title: t.t("popularToday"),
            tag: best_seller_label,
            items,
            eta_label: t.t("etaLabel"),
            eta_value: t.t("etaValue"),
        },
        menu: Link {
            label: t.t("ctaMenu"),
            href: locale.href("/menu"),
        },
        order: Link {
            label: t.t("ctaOrder"),
            href: locale.href("/checkout"),
        },
        categories_title: t.t("categories"),
        categories_subtitle: t.t("categoriesSubtitle"),
        categories,
        explore: t.t("explore"),
        best_sellers_title: t.t("bestSellersTitle"),
        best_sellers_subtitle: t.t("bestSellersSubtitle"),
        see_all: Link {
            label: t.t("seeAll"),
            href: locale.href("/menu"),
        },
        best_sellers,
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

/// `GET /{locale}/menu?category=&q=`
pub async fn menu(
    State(state): State<AppState>,
    ResolvedLocale(locale): ResolvedLocale,
    Query(params): Query<MenuQuery>,
) -> Result<Json<MenuPage>> {
    let t = state.messages.scope(locale, "menu");

    let category = normalize_category(params.category.as_deref());
    let query = normalize_query(params.q.as_deref());

    let products = backend(&state)?
        .fetch_products(locale, category.map(|c| c.key()))
        .await?;

    let best_seller_label = t.t("bestSeller");
    let products: Vec<ProductCard> = products
        .into_iter()
        .filter(|p| query.as_deref().map_or(true, |q| p.matches(q)))
        .map(|p| ProductCard::new(p, &best_seller_label))
        .collect();

    let mut tabs = vec![Tab {
        label: t.t("tabAll"),
        href: locale.href("/menu"),
        active: category.is_none(),
    }];
    tabs.extend(Category::ALL.into_iter().map(|c| Tab {
        label: t.t(c.tab_label_key()),
        href: locale.href(&format!("/menu?category={}", c.key())),
        active: category == Some(c),
    }));

    let empty = products.is_empty().then(|| EmptyState {
        title: t.t("emptyTitle"),
        subtitle: t.t("emptySubtitle"),
        reset: Link {
            label: t.t("reset"),
            href: locale.href("/menu"),
        },
    });

    Ok(Json(MenuPage {
        locale,
        title: t.t("title"),
        subtitle: t.t("subtitle"),
        checkout: Link {
            label: t.t("goToCheckout"),
            href: locale.href("/checkout"),
        },
        tabs,
        search: SearchForm {
            action: locale.href("/menu"),
            placeholder: t.t("searchPlaceholder"),
            submit: t.t("search"),
            query: params.q.unwrap_or_default(),
            category: category.map(|c| c.key()),
        },
        add_to_cart: t.t("addToCart"),
        details: t.t("details"),
        products,
        empty,
    }))
}

/// `GET /{locale}/checkout`
pub async fn checkout(
    State(state): State<AppState>,
    ResolvedLocale(locale): ResolvedLocale,
) -> Json<CheckoutPage> {
    let t = state.messages.scope(locale, "checkout");

    let fields = ["customerName", "phone", "address"]
        .into_iter()
        .map(|name| FormField {
            name,
            label: t.t(name),
        })
        .collect();

    let payment_methods = PaymentMethod::ALL
        .into_iter()
        .map(|method| PaymentOption {
            method,
            label: t.t(method.label_key()),
        })
        .collect();

    Json(CheckoutPage {
        locale,
        title: t.t("title"),
        subtitle: t.t("subtitle"),
        action: locale.href("/checkout"),
        fields,
        payment_label: t.t("paymentMethod"),
        payment_methods,
        submit: t.t("submit"),
        back: Link {
            label: t.t("backToMenu"),
            href: locale.href("/menu"),
        },
    })
}

/// `POST /{locale}/checkout`
pub async fn place_order(
    State(state): State<AppState>,
    ResolvedLocale(locale): ResolvedLocale,
    Json(order): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>)> {
    order.validate().map_err(StorefrontError::InvalidOrder)?;

    let created = backend(&state)?.create_order(locale, &order).await?;
    info!(order_id = %created.id, locale = %locale, "Order placed");

    Ok((StatusCode::CREATED, Json(created)))
}
