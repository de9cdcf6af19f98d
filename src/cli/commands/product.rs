//! Product commands - list, show, add, update and delete listings.
//!
//! This is where form validation lives: the catalog accepts whatever it is given, so a
//! blank name is rejected here before the catalog is ever called.

use crate::{
    cli::AppContext,
    errors::Result,
    language::interpret_input,
    models::{Product, ProductDraft, ProductForm, ProductId, ProductPatch, product},
    notifications::Notification,
};
use clap::{Args, Subcommand};
use std::fmt::Write as _;

const NAME_REQUIRED: &str = "Product name is required";

/// Product subcommands
#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// List all products
    List {
        /// Only show products whose name or category contains this text
        #[arg(long)]
        query: Option<String>,
    },
    /// Show every field of one product
    Show {
        /// Product id
        id: i64,
    },
    /// Add a new product
    Add(ProductAddArgs),
    /// Edit an existing product
    Update(ProductUpdateArgs),
    /// Delete a product
    Delete {
        /// Product id
        id: i64,
    },
}

/// Raw add-form fields; price and quantity are coerced, not rejected.
#[derive(Debug, Args)]
pub struct ProductAddArgs {
    /// Product name (required)
    #[arg(long, default_value = "")]
    pub name: String,
    /// Free-text description
    #[arg(long, default_value = "")]
    pub description: String,
    /// Category, e.g. Spices
    #[arg(long, default_value = "")]
    pub category: String,
    /// Unit price, e.g. 49.99
    #[arg(long, default_value = "")]
    pub price: String,
    /// Units in stock
    #[arg(long, default_value = "")]
    pub quantity: String,
    /// Describe the product in any supported language; it is detected and translated
    #[arg(long, conflicts_with = "voice")]
    pub from_text: Option<String>,
    /// Describe the product by voice (simulated recording)
    #[arg(long)]
    pub voice: bool,
}

/// Edit-form fields; anything omitted stays as it is.
#[derive(Debug, Args)]
pub struct ProductUpdateArgs {
    /// Product id
    pub id: i64,
    /// New name; must not be blank
    #[arg(long)]
    pub name: Option<String>,
    /// New description
    #[arg(long)]
    pub description: Option<String>,
    /// New category
    #[arg(long)]
    pub category: Option<String>,
    /// New unit price
    #[arg(long)]
    pub price: Option<String>,
    /// New stock level
    #[arg(long)]
    pub quantity: Option<String>,
}

/// Executes a product subcommand.
pub async fn run(ctx: &AppContext, command: ProductCommand) -> Result<String> {
    match command {
        ProductCommand::List { query } => Ok(list(ctx, query.as_deref()).await),
        ProductCommand::Show { id } => Ok(show(ctx, ProductId(id)).await),
        ProductCommand::Add(args) => add(ctx, args).await,
        ProductCommand::Update(args) => Ok(update(ctx, args).await),
        ProductCommand::Delete { id } => Ok(delete(ctx, ProductId(id)).await),
    }
}

async fn list(ctx: &AppContext, query: Option<&str>) -> String {
    let mut products = ctx.catalog.list().await;
    if products.is_empty() {
        return "No products yet. Add one with `talk2trade products add`.".to_string();
    }
    if let Some(query) = query.filter(|q| !q.trim().is_empty()) {
        products.retain(|p| matches_query(p, query));
        if products.is_empty() {
            return format!("No products match `{query}`.");
        }
    }
    let mut out = format!("📦 {} product(s)\n", products.len());
    for p in &products {
        let _ = writeln!(out, "{}", format_product_line(p));
    }
    out
}

async fn show(ctx: &AppContext, id: ProductId) -> String {
    ctx.catalog.get(id).await.map_or_else(
        || format!("❌ Product #{id} not found."),
        |p| format_product_details(&p),
    )
}

async fn add(ctx: &AppContext, args: ProductAddArgs) -> Result<String> {
    if args.name.trim().is_empty() {
        ctx.notifier.notify(Notification::error(NAME_REQUIRED));
        return Ok(format!("❌ {NAME_REQUIRED}."));
    }

    let mut draft = ProductDraft::from_form(ProductForm {
        name: args.name,
        description: args.description,
        category: args.category,
        price: args.price,
        quantity: args.quantity,
        ..ProductForm::default()
    });

    if let Some(text) = args.from_text.filter(|t| !t.trim().is_empty()) {
        let settings = ctx.settings.get().await;
        let interpretation = interpret_input(
            &text,
            ctx.translator.as_ref(),
            settings.language,
            settings.auto_detect_language,
        )
        .await?;
        if let Some(detection) = &interpretation.detection {
            ctx.notifier.notify(Notification::language_detected(
                detection.language,
                detection.confidence,
            ));
        }
        fill_provenance(
            &mut draft,
            interpretation.local_input,
            interpretation.translated_input,
        );
    } else if args.voice {
        let transcript = ctx.transcriber.transcribe(&[]).await?;
        fill_provenance(&mut draft, transcript.original, transcript.translated);
    }

    let product = ctx.catalog.add(draft).await;
    let note = if product.offline {
        " (saved offline, will sync when connection is restored)"
    } else {
        ""
    };
    Ok(format!("✅ Added {}{note}", format_product_line(&product)))
}

async fn update(ctx: &AppContext, args: ProductUpdateArgs) -> String {
    if args.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        ctx.notifier.notify(Notification::error(NAME_REQUIRED));
        return format!("❌ {NAME_REQUIRED}.");
    }

    let patch = ProductPatch {
        name: args.name,
        description: args.description,
        category: args.category,
        price: args.price.as_deref().map(product::parse_price),
        quantity: args.quantity.as_deref().map(product::parse_quantity),
        ..ProductPatch::default()
    };
    if patch.is_empty() {
        return "Nothing to update. Pass at least one field, e.g. `--price 60`.".to_string();
    }

    let id = ProductId(args.id);
    match ctx.catalog.update(id, patch).await {
        Some(p) => format!("✅ Updated {}", format_product_line(&p)),
        None => not_changeable(ctx, id).await,
    }
}

async fn delete(ctx: &AppContext, id: ProductId) -> String {
    if ctx.catalog.remove(id).await {
        format!("🗑️ Deleted product #{id}.")
    } else {
        not_changeable(ctx, id).await
    }
}

/// Reply for an update or delete the catalog refused. Sample products are listed but
/// cannot be changed until the first real product is added.
async fn not_changeable(ctx: &AppContext, id: ProductId) -> String {
    if ctx.catalog.get(id).await.is_some() {
        format!("❌ Product #{id} is a sample listing and is read-only until you add a product.")
    } else {
        format!("❌ Product #{id} not found.")
    }
}

/// Case-insensitive match on name or category.
fn matches_query(p: &Product, query: &str) -> bool {
    let query = query.to_lowercase();
    p.name.to_lowercase().contains(&query) || p.category.to_lowercase().contains(&query)
}

/// Description defaults to the translation when the form left it blank.
fn fill_provenance(draft: &mut ProductDraft, local_input: String, translated_input: String) {
    if draft.description.trim().is_empty() {
        draft.description.clone_from(&translated_input);
    }
    draft.local_input = local_input;
    draft.translated_input = translated_input;
}

/// One-line summary as shown in the product list.
#[must_use]
pub fn format_product_line(p: &Product) -> String {
    let category: &str = if p.category.is_empty() {
        "Uncategorized"
    } else {
        &p.category
    };
    let mut line = format!(
        "#{} {} · {category} · ₹{} · Stock: {}",
        p.id, p.name, p.price, p.quantity
    );
    if p.offline {
        line.push_str(" · offline");
    }
    line
}

fn format_product_details(p: &Product) -> String {
    let mut out = format_product_line(p);
    let _ = write!(out, "\n  Description: {}", or_dash(&p.description));
    let _ = write!(out, "\n  Original input: {}", or_dash(&p.local_input));
    let _ = write!(out, "\n  Translation: {}", or_dash(&p.translated_input));
    let _ = write!(
        out,
        "\n  Sync: {}",
        if p.synced { "synced" } else { "not synced" }
    );
    let _ = write!(
        out,
        "\n  Created: {}\n  Updated: {}",
        p.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        p.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    out
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}
