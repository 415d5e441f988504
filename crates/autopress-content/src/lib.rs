//! Article content assembly for AI-generated posts.
//!
//! Recovers a structured article from raw completion text, normalizes its
//! newline conventions into HTML paragraphs, and injects keyword links into
//! the final HTML before publishing. Every stage is a pure, synchronous
//! transformation over caller-owned strings.

pub mod error;
pub mod html;
pub mod normalize;
pub mod pipeline;
pub mod recover;
pub mod seo;

pub use autopress_core::{GenerationResult, SeoLinkRule};
pub use error::ContentError;
pub use normalize::{clean_title, normalize_content};
pub use pipeline::assemble_article;
pub use recover::recover_article;
pub use seo::{
    find_insertion_positions, inject_seo_links, inject_seo_links_with_report, InsertionPosition,
    RuleOutcome,
};
