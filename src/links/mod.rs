// src/links/mod.rs
// =============================================================================
// Link handling that does not touch the network.
//
// Submodules:
// - html: pulls anchor links out of a page and resolves them
// - extension: narrows a list of links down to the wanted file types
// =============================================================================

mod extension;
mod html;

pub use extension::{filter_by_extension, parse_extension_list};
pub use html::extract_links;
