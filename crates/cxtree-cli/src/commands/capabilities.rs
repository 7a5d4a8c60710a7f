use cxtree_core::Category;
use cxtree_parser::CatalogListing;
use cxtree_parser::frontend::libclang::catalog_listing;

use crate::cli::root_commands::CapabilitiesArgs;
use crate::output;

/// Handle `cxtree capabilities`. Never loads libclang.
pub fn handle(args: &CapabilitiesArgs) -> anyhow::Result<()> {
    let listings = listings(args.category.map(Category::from));
    output::output(&serde_json::to_value(&listings)?, false)
}

fn listings(category: Option<Category>) -> Vec<CatalogListing> {
    category.map_or_else(
        || Category::ALL.into_iter().map(catalog_listing).collect(),
        |category| vec![catalog_listing(category)],
    )
}
