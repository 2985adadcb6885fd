//! Human-readable tool listings

use std::collections::BTreeMap;

use crate::Tool;

/// Group tools by name without any `@suffix`, keys in sorted order.
///
/// Within a group tools keep their resolution order, so the first entry is
/// the one a bare-name query resolves to.
pub fn to_simple_name_map(tools: &[Tool]) -> BTreeMap<String, Vec<Tool>> {
    let mut map: BTreeMap<String, Vec<Tool>> = BTreeMap::new();
    for tool in tools {
        let key = tool.name().split('@').next().unwrap_or_default();
        map.entry(key.to_string()).or_default().push(tool.clone());
    }
    map
}

/// One `name = namespace/name` line per simple name, followed by an
/// indented `->` line for each shadowed variant.
pub fn to_text_block(tools: &[Tool]) -> String {
    let mut lines = Vec::new();
    for (key, group) in to_simple_name_map(tools) {
        let mut group = group.iter();
        if let Some(first) = group.next() {
            lines.push(format!("{:>21} = {}", key, first.to_namespace_and_name()));
        }
        lines.extend(group.map(|tool| format!("   -> {}", tool.to_namespace_and_name())));
    }
    lines.join("\n")
}
