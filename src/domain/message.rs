//! Message synthesis for omitted deprecation messages.
//!
//! When the caller supplies no explicit message, a label is derived from the
//! entity descriptor. The rule order matters: named forms must win over the
//! generic anonymous fallback so readable identifiers are preferred whenever
//! one is available.

use crate::domain::{
    entity::{EntityDescriptor, EntityKind},
    frame::CallFrame,
};

/// Derive a message for an entity that was deprecated without one.
///
/// Resolution order:
/// 1. named function with an enclosing-object label → `"Owner.name"`
/// 2. named function accessed bare → `"name"`
/// 3. unnamed function retrieved through an object → the access-path label
///    verbatim
/// 4. unnamed function otherwise → `"<anonymous@file:line:col>"`, preferring
///    the definition site recorded in the descriptor, falling back to the
///    call site
/// 5. bare warning call → the declaration-site label verbatim, or the
///    anonymous call-site tag when no label was given
pub fn synthesize(entity: &EntityDescriptor, call_site: &CallFrame) -> String {
    match entity.kind() {
        EntityKind::Bare { label } => match label {
            Some(label) => label.clone(),
            None => anonymous_tag_for_frame(call_site),
        },
        EntityKind::Function {
            name,
            owner,
            definition_site,
            ..
        } => match (name, owner) {
            (Some(name), Some(owner)) => format!("{}.{}", owner, name),
            (Some(name), None) => name.clone(),
            (None, Some(owner)) => owner.clone(),
            (None, None) => match definition_site {
                Some(site) => format!("<anonymous@{}:{}:{}>", site.file, site.line, site.column),
                None => anonymous_tag_for_frame(call_site),
            },
        },
    }
}

fn anonymous_tag_for_frame(frame: &CallFrame) -> String {
    format!("<anonymous@{}:{}:{}>", frame.file, frame.line, frame.column)
}
