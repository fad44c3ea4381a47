//! One-shot product operations against a running registry.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::cli::{output, AddArgs, ListArgs};
use crate::client::HttpRegistryClient;
use crate::config::Config;
use crate::domain::{Product, ProductDraft};
use crate::error::Result;
use crate::store::ProductStore;

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: i32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
}

impl ProductRow {
    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.value(),
            name: product.name.clone(),
            category: product.category.clone().unwrap_or_else(|| "-".to_string()),
            price: product.price.to_string(),
            quantity: product.quantity,
        }
    }
}

/// Render products as a text table.
pub(crate) fn product_table<'a>(products: impl IntoIterator<Item = &'a Product>) -> String {
    let rows: Vec<ProductRow> = products.into_iter().map(ProductRow::from_product).collect();
    Table::new(rows).to_string()
}

fn client_for(config: &Config, api_url: Option<&str>) -> HttpRegistryClient {
    HttpRegistryClient::new(api_url.unwrap_or(&config.client.api_url))
}

/// List products in the registry.
pub async fn list(args: &ListArgs) -> Result<()> {
    let config = Config::load(&args.config)?;
    let client = client_for(&config, args.api_url.as_deref());
    let threshold = config.inventory.low_stock_threshold;

    let mut products = client.list().await?;
    if args.low_stock {
        products.retain(|product| product.is_low_stock(threshold));
    }

    if output::is_json() {
        output::json_output(&json!({
            "command": "products.list",
            "low_stock_only": args.low_stock,
            "products": products,
        }));
        return Ok(());
    }

    if products.is_empty() {
        output::note(if args.low_stock {
            "Nothing is low on stock."
        } else {
            "The registry has no products yet."
        });
        return Ok(());
    }

    output::lines(&product_table(&products));

    if !args.low_stock {
        let low = products
            .iter()
            .filter(|product| product.is_low_stock(threshold))
            .count();
        if low > 0 {
            output::warning(&format!(
                "{low} product(s) at or below the {threshold}-unit low-stock threshold"
            ));
        }
    }

    Ok(())
}

/// Add a product to the registry.
pub async fn add(args: &AddArgs) -> Result<()> {
    let config = Config::load(&args.config)?;
    let client = client_for(&config, args.api_url.as_deref());

    let draft = ProductDraft::try_new(
        args.name.clone(),
        args.description.clone(),
        args.category.clone(),
        args.price,
        args.quantity,
    )?;

    let product = client.create(&draft).await?;

    if output::is_json() {
        output::json_output(&json!({
            "command": "products.add",
            "product": product,
        }));
        return Ok(());
    }

    output::success(&format!(
        "Added {} (id {}) at {} with {} on hand",
        product.name, product.id, product.price, product.quantity
    ));

    Ok(())
}
