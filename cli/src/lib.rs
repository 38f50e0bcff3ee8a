// SPDX-License-Identifier: MIT OR Apache-2.0

//! Joseki CLI - terminal front end for the joseki trainer
//!
//! The binary is a thin loop over stdin; command parsing, reference tree
//! loading and board rendering live here so they can be tested headless.

pub mod command;
pub mod render;

use anyhow::{Context, Result};
use joseki_core::sgf::parse_tree;
use joseki_core::JosekiTree;
use std::path::Path;

/// Load a joseki reference tree from an SGF file
pub fn load_tree(path: &Path) -> Result<JosekiTree> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read reference tree {}", path.display()))?;
    let tree = parse_tree(&text)
        .with_context(|| format!("Failed to parse reference tree {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        nodes = tree.node_count(),
        name = tree.info.name.as_deref().unwrap_or(""),
        "loaded reference tree"
    );
    Ok(tree)
}
