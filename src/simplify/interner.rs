// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, HashMap};

use crate::model::{GlobalVarTable, StyleCategory, StyleValue, VarId};

/// Per-conversion dedup table for style values.
///
/// Values are compared by their canonical JSON form; callers must hand in normalized values
/// (see the sibling normalization modules) for that comparison to be structural. One
/// `Interner` belongs to exactly one traversal; never share it between conversions.
#[derive(Debug, Default)]
pub struct Interner {
    index: HashMap<(StyleCategory, String), VarId>,
    entries: Vec<(VarId, StyleValue)>,
    counters: BTreeMap<StyleCategory, u32>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of `value` within `category`, allocating the next ordinal on first sight.
    pub fn intern(&mut self, category: StyleCategory, value: StyleValue) -> VarId {
        let key = canonical_key(&value);
        if let Some(existing) = self.index.get(&(category, key.clone())) {
            return existing.clone();
        }

        let counter = self.counters.entry(category).or_insert(0);
        *counter += 1;
        let var = VarId::new(category, *counter);
        self.index.insert((category, key), var.clone());
        self.entries.push((var.clone(), value));
        var
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy of the table in first-seen order.
    pub fn snapshot(&self) -> GlobalVarTable {
        GlobalVarTable::from_entries(self.entries.clone())
    }

    pub fn into_table(self) -> GlobalVarTable {
        GlobalVarTable::from_entries(self.entries)
    }
}

fn canonical_key(value: &StyleValue) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{value:?}"))
}

#[cfg(test)]
mod tests {
    use super::Interner;
    use crate::model::{
        EffectStyle, Fill, FillList, StyleCategory, StyleValue, TextStyle,
    };

    fn solid(color: &str) -> StyleValue {
        StyleValue::Fills(FillList(vec![Fill::Solid(color.to_owned())]))
    }

    fn inter_14() -> StyleValue {
        StyleValue::Typography(TextStyle {
            font_family: Some("Inter".to_owned()),
            font_weight: Some(400),
            font_size: Some(14.0),
            ..TextStyle::default()
        })
    }

    #[test]
    fn equal_values_share_one_id() {
        let mut interner = Interner::new();
        let a = interner.intern(StyleCategory::Fill, solid("#FF0000"));
        let b = interner.intern(StyleCategory::Fill, solid("#FF0000"));
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "fill_1");
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn distinct_values_get_sequential_ids() {
        let mut interner = Interner::new();
        assert_eq!(interner.intern(StyleCategory::Fill, solid("#FF0000")).as_str(), "fill_1");
        assert_eq!(interner.intern(StyleCategory::Fill, solid("#00FF00")).as_str(), "fill_2");
        assert_eq!(
            interner.intern(StyleCategory::Typography, inter_14()).as_str(),
            "typography_1"
        );
    }

    #[test]
    fn same_value_under_two_categories_is_stored_twice() {
        let mut interner = Interner::new();
        let fill = interner.intern(StyleCategory::Fill, solid("#000000"));
        let other = interner.intern(StyleCategory::Stroke, solid("#000000"));
        assert_ne!(fill, other);
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn snapshot_preserves_first_seen_order() {
        let mut interner = Interner::new();
        interner.intern(StyleCategory::Typography, inter_14());
        interner.intern(
            StyleCategory::Effect,
            StyleValue::Effect(EffectStyle {
                filter: Some("blur(4px)".to_owned()),
                ..EffectStyle::default()
            }),
        );
        interner.intern(StyleCategory::Fill, solid("#FFFFFF"));
        interner.intern(StyleCategory::Typography, inter_14());

        let table = interner.snapshot();
        let ids: Vec<&str> = table.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["typography_1", "effect_1", "fill_1"]);
        assert_eq!(table, interner.into_table());
    }

    #[test]
    fn field_order_in_source_does_not_matter() {
        let mut interner = Interner::new();
        let a = interner.intern(StyleCategory::Typography, inter_14());
        let b = interner.intern(
            StyleCategory::Typography,
            StyleValue::Typography(TextStyle {
                font_size: Some(14.0),
                font_weight: Some(400),
                font_family: Some("Inter".to_owned()),
                ..TextStyle::default()
            }),
        );
        assert_eq!(a, b);
    }
}
