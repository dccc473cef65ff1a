// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::raw::{RawColor, RawEffect, RawNode};
use crate::model::EffectStyle;

use super::units::{css_color, px, round2};

fn shadow(effect: &RawEffect, inset: bool, with_spread: bool) -> String {
    let offset = effect.offset.unwrap_or_default();
    let fallback = RawColor {
        a: Some(0.25),
        ..RawColor::default()
    };
    let color = css_color(&effect.color.unwrap_or(fallback), None);
    let mut parts = Vec::with_capacity(6);
    if inset {
        parts.push("inset".to_owned());
    }
    parts.push(px(offset.x));
    parts.push(px(offset.y));
    parts.push(px(effect.radius));
    if with_spread {
        parts.push(px(effect.spread.unwrap_or(0.0)));
    }
    parts.push(color);
    parts.join(" ")
}

fn blur(effect: &RawEffect) -> String {
    format!("blur({})", px(round2(effect.radius)))
}

/// Folds visible effects into CSS-like strings. Text nodes get `textShadow` instead of
/// `boxShadow`; inner shadows have no text equivalent and are dropped there.
pub(crate) fn effects(node: &RawNode, is_text: bool) -> Option<EffectStyle> {
    let effects = node.effects.as_deref()?;

    let mut shadows = Vec::new();
    let mut filters = Vec::new();
    let mut backdrop_filters = Vec::new();
    for effect in effects.iter().filter(|effect| effect.is_visible()) {
        match effect.effect_type.as_str() {
            "DROP_SHADOW" => shadows.push(shadow(effect, false, !is_text)),
            "INNER_SHADOW" if !is_text => shadows.push(shadow(effect, true, true)),
            "LAYER_BLUR" => filters.push(blur(effect)),
            "BACKGROUND_BLUR" => backdrop_filters.push(blur(effect)),
            _ => {}
        }
    }

    let joined =
        |parts: Vec<String>, separator: &str| (!parts.is_empty()).then(|| parts.join(separator));
    let shadow = joined(shadows, ", ");
    let style = EffectStyle {
        box_shadow: if is_text { None } else { shadow.clone() },
        text_shadow: if is_text { shadow } else { None },
        filter: joined(filters, " "),
        backdrop_filter: joined(backdrop_filters, " "),
    };
    (!style.is_empty()).then_some(style)
}
