//! Interactive stock-keeping console.
//!
//! One clerk session: log in, look at the shelf, add products, adjust
//! counts, retire products. Every mutation goes through the registry API,
//! so what the console shows is what the registry stored.

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password, Select};

use crate::auth::{Credentials, SessionGate, StaticAuthenticator};
use crate::cli::products::product_table;
use crate::cli::{output, ConsoleArgs};
use crate::client::HttpRegistryClient;
use crate::config::Config;
use crate::domain::{Product, ProductId};
use crate::error::{Error, Result};
use crate::store::ProductStore;
use crate::view::{InventoryView, ProductForm};

/// Execute the console command.
pub async fn execute(args: &ConsoleArgs) -> Result<()> {
    let config = Config::load(&args.config)?;
    config.validate()?;
    config.init_logging();

    let api_url = args
        .api_url
        .clone()
        .unwrap_or_else(|| config.client.api_url.clone());
    let threshold = config.inventory.low_stock_threshold;

    output::header(env!("CARGO_PKG_VERSION"));

    let theme = ColorfulTheme::default();
    let mut gate = SessionGate::new(Box::new(StaticAuthenticator::from_config(&config.auth)));

    output::section("Login");
    let session = loop {
        let username: String = Input::with_theme(&theme)
            .with_prompt("Username")
            .interact()?;
        let password = Password::with_theme(&theme)
            .with_prompt("Password")
            .interact()?;

        match gate.login(&Credentials::new(username, password)).await {
            Ok(session) => break session,
            Err(e) => output::error(&e.to_string()),
        }
    };
    output::success(&format!("Signed in as {}", session.username));

    let mut view = InventoryView::new(HttpRegistryClient::new(api_url));
    if let Err(e) = view.load_snapshot().await {
        output::error(&format!("Could not reach the registry: {e}"));
        output::hint(&format!(
            "start it with {}",
            output::highlight("larder serve")
        ));
        std::process::exit(1);
    }
    output::note(&format!("{} product(s) on record.", view.products().len()));

    let actions = &[
        "List products",
        "Add product",
        "Adjust quantity",
        "Remove product",
        "Low stock report",
        "Refresh from registry",
        "Quit",
    ];

    loop {
        println!();
        let action = Select::with_theme(&theme)
            .with_prompt("What next?")
            .items(actions)
            .default(0)
            .interact()?;

        let result = match action {
            0 => {
                list_products(&view, threshold);
                Ok(())
            }
            1 => add_product(&theme, &mut view).await,
            2 => adjust_product(&theme, &mut view).await,
            3 => remove_product(&theme, &mut view).await,
            4 => {
                low_stock_report(&view, threshold);
                Ok(())
            }
            5 => refresh(&mut view).await,
            _ => break,
        };

        // Terminal failures end the session; registry and validation
        // failures are shown and leave the snapshot unchanged.
        if let Err(e) = result {
            if matches!(e, Error::Io(_)) {
                return Err(e);
            }
            output::error(&e.to_string());
        }
    }

    output::note("Goodbye.");
    Ok(())
}

fn list_products<S: ProductStore>(view: &InventoryView<S>, threshold: u32) {
    if view.products().is_empty() {
        output::note("The registry has no products yet.");
        return;
    }

    output::lines(&product_table(view.products()));

    let low = view.low_stock(threshold).len();
    if low > 0 {
        output::warning(&format!(
            "{low} product(s) at or below the {threshold}-unit low-stock threshold"
        ));
    }
}

async fn add_product<S: ProductStore>(
    theme: &ColorfulTheme,
    view: &mut InventoryView<S>,
) -> Result<()> {
    let name: String = Input::with_theme(theme).with_prompt("Name").interact()?;
    let description: String = Input::with_theme(theme)
        .with_prompt("Description (optional)")
        .allow_empty(true)
        .interact()?;
    let category: String = Input::with_theme(theme)
        .with_prompt("Category (optional)")
        .allow_empty(true)
        .interact()?;
    let price: String = Input::with_theme(theme).with_prompt("Price").interact()?;
    let quantity: String = Input::with_theme(theme)
        .with_prompt("Quantity")
        .interact()?;

    let form = ProductForm {
        name,
        description,
        category,
        price,
        quantity,
    };

    let product = view.submit_new_product(form).await?;
    output::success(&format!("Added {} (id {})", product.name, product.id));
    Ok(())
}

async fn adjust_product<S: ProductStore>(
    theme: &ColorfulTheme,
    view: &mut InventoryView<S>,
) -> Result<()> {
    let Some(id) = select_product(theme, view.products(), "Adjust which product?")? else {
        return Ok(());
    };

    let delta: i64 = Input::with_theme(theme)
        .with_prompt("Quantity change (negative to deduct)")
        .interact()?;

    let updated = view.adjust_quantity(id, delta).await?;
    output::success(&format!(
        "{} now has {} on hand",
        updated.name, updated.quantity
    ));
    Ok(())
}

async fn remove_product<S: ProductStore>(
    theme: &ColorfulTheme,
    view: &mut InventoryView<S>,
) -> Result<()> {
    let Some(id) = select_product(theme, view.products(), "Remove which product?")? else {
        return Ok(());
    };
    let name = view
        .find(id)
        .map(|product| product.name.clone())
        .unwrap_or_else(|| id.to_string());

    let confirmed = Confirm::with_theme(theme)
        .with_prompt(format!("Remove {name} from the registry?"))
        .default(false)
        .interact()?;
    if !confirmed {
        output::note("Nothing removed.");
        return Ok(());
    }

    view.remove(id).await?;
    output::success(&format!("Removed {name}"));
    Ok(())
}

fn low_stock_report<S: ProductStore>(view: &InventoryView<S>, threshold: u32) {
    let low = view.low_stock(threshold);
    if low.is_empty() {
        output::success("Nothing is low on stock.");
        return;
    }

    let count = low.len();
    output::lines(&product_table(low));
    output::warning(&format!("{count} product(s) need restocking"));
}

async fn refresh<S: ProductStore>(view: &mut InventoryView<S>) -> Result<()> {
    view.load_snapshot().await?;
    output::success(&format!(
        "Snapshot refreshed, {} product(s) on record",
        view.products().len()
    ));
    Ok(())
}

fn select_product(
    theme: &ColorfulTheme,
    products: &[Product],
    prompt: &str,
) -> Result<Option<ProductId>> {
    if products.is_empty() {
        output::note("The registry has no products yet.");
        return Ok(None);
    }

    let labels: Vec<String> = products
        .iter()
        .map(|product| {
            format!(
                "{} {} ({} on hand)",
                product.id, product.name, product.quantity
            )
        })
        .collect();

    let index = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(products.get(index).map(|product| product.id))
}
