use std::collections::{BTreeMap, HashSet};

// ---------------------------------------------------------------------------
// OutlineEntry
// ---------------------------------------------------------------------------

/// One flattened bookmark: its nesting depth (1-based), decoded title, and
/// the 1-based page number its destination resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub depth: usize,
    pub title: String,
    pub page: u32,
}

/// Depth guard against malformed, self-referential outline trees.
const MAX_DEPTH: usize = 64;
/// Sibling guard against cyclic `/Next` chains the visited-set misses.
const MAX_SIBLINGS: usize = 10_000;

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Extract the document outline (bookmarks) from the PDF catalog.
///
/// Walks the `/Outlines` tree using `/First` child and `/Next` sibling
/// links, resolving each item's destination to a page number. Items whose
/// destination cannot be resolved are omitted; a document without an
/// outline yields an empty list rather than an error.
pub fn extract_outline(doc: &lopdf::Document) -> Vec<OutlineEntry> {
    let Some(catalog) = resolve_dict(doc, doc.trailer.get(b"Root").ok()) else {
        return Vec::new();
    };
    let Some(outlines) = resolve_dict(doc, catalog.get(b"Outlines").ok()) else {
        return Vec::new();
    };
    let Ok(lopdf::Object::Reference(first)) = outlines.get(b"First") else {
        return Vec::new();
    };

    // Invert the page map so destination page references resolve to numbers.
    let page_numbers: BTreeMap<lopdf::ObjectId, u32> = doc
        .get_pages()
        .into_iter()
        .map(|(num, id)| (id, num))
        .collect();

    let mut entries = Vec::new();
    walk_level(doc, *first, 1, &page_numbers, &mut entries);
    entries
}

/// Walk one sibling chain, recursing into children.
fn walk_level(
    doc: &lopdf::Document,
    first: lopdf::ObjectId,
    depth: usize,
    page_numbers: &BTreeMap<lopdf::ObjectId, u32>,
    entries: &mut Vec<OutlineEntry>,
) {
    if depth > MAX_DEPTH {
        return;
    }

    let mut current = Some(first);
    let mut visited = HashSet::new();
    let mut siblings = 0;

    while let Some(node_id) = current {
        if !visited.insert(node_id) || siblings >= MAX_SIBLINGS {
            break;
        }
        siblings += 1;

        let Ok(node) = doc.get_object(node_id) else {
            break;
        };
        let Ok(dict) = node.as_dict() else {
            break;
        };

        let title = dict
            .get(b"Title")
            .ok()
            .and_then(|obj| decode_outline_string(doc, obj));

        if let (Some(title), Some(page)) = (title, resolve_destination(doc, dict, page_numbers)) {
            entries.push(OutlineEntry { depth, title, page });
        }

        if let Ok(lopdf::Object::Reference(child)) = dict.get(b"First") {
            walk_level(doc, *child, depth + 1, page_numbers, entries);
        }

        current = match dict.get(b"Next") {
            Ok(lopdf::Object::Reference(next)) => Some(*next),
            _ => None,
        };
    }
}

// ---------------------------------------------------------------------------
// Destination resolution
// ---------------------------------------------------------------------------

/// Resolve an outline item's target page, checking `/Dest` first and then
/// the `/A` GoTo action.
fn resolve_destination(
    doc: &lopdf::Document,
    dict: &lopdf::Dictionary,
    page_numbers: &BTreeMap<lopdf::ObjectId, u32>,
) -> Option<u32> {
    if let Ok(dest) = dict.get(b"Dest") {
        if let Some(page) = dest_to_page(doc, dest, page_numbers) {
            return Some(page);
        }
    }

    let action = resolve_dict(doc, dict.get(b"A").ok())?;
    match action.get(b"S") {
        Ok(lopdf::Object::Name(kind)) if kind == b"GoTo" => {
            dest_to_page(doc, action.get(b"D").ok()?, page_numbers)
        }
        _ => None,
    }
}

/// Resolve a destination object (explicit array `[page_ref /XYZ ...]`, or a
/// reference to one) to a page number.
fn dest_to_page(
    doc: &lopdf::Document,
    dest: &lopdf::Object,
    page_numbers: &BTreeMap<lopdf::ObjectId, u32>,
) -> Option<u32> {
    let dest = match dest {
        lopdf::Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    match dest {
        lopdf::Object::Array(parts) => match parts.first()? {
            lopdf::Object::Reference(page_id) => page_numbers.get(page_id).copied(),
            _ => None,
        },
        _ => None,
    }
}

/// Follow at most one level of indirection to a dictionary.
fn resolve_dict<'a>(
    doc: &'a lopdf::Document,
    obj: Option<&'a lopdf::Object>,
) -> Option<&'a lopdf::Dictionary> {
    match obj? {
        lopdf::Object::Reference(id) => doc.get_object(*id).ok()?.as_dict().ok(),
        lopdf::Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// String decoding
// ---------------------------------------------------------------------------

/// Best-effort decoding of an outline title.
///
/// Handles three cases in order:
/// 1. UTF-16BE with BOM (`\xFE\xFF` prefix) -- strips BOM and decodes.
/// 2. Valid UTF-8 -- returned as-is.
/// 3. Fallback to Latin-1 -- each byte mapped to its Unicode code point.
fn decode_outline_string(doc: &lopdf::Document, obj: &lopdf::Object) -> Option<String> {
    let obj = match obj {
        lopdf::Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    match obj {
        lopdf::Object::String(bytes, _) => Some(decode_text_bytes(bytes)),
        lopdf::Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

fn decode_text_bytes(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let code_units: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter(|chunk| chunk.len() == 2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .collect();
        return String::from_utf16_lossy(&code_units);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    bytes.iter().map(|&b| b as char).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
