//! # Ticket Identifier Codec & QR Payloads
//!
//! Everything about the string a printed QR code carries.
//!
//! ## Lifecycle of a ticket identifier
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  issue:   tag "GLOVE" + sequence 7                                      │
//! │                │                                                        │
//! │                ▼ format_ticket_id                                       │
//! │           "GLOVE_7"                                                     │
//! │                │                                                        │
//! │                ▼ ticket_url                                             │
//! │           "https://stock.example.org/?qrcode=GLOVE_7"                   │
//! │                │                                                        │
//! │                ▼ render_qr_svg                                          │
//! │           <svg ...> (printed and taped to the shelf)                    │
//! │                                                                         │
//! │  redeem:  camera frame decodes the URL, or the user opens it directly   │
//! │                │                                                        │
//! │                ▼ extract_ticket_id                                      │
//! │           "GLOVE_7"  ──►  redemption engine                             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All functions here are pure: same input, same output, no state.

use url::Url;

use crate::error::{CoreError, CoreResult};
use crate::TICKET_QUERY_PARAM;

// =============================================================================
// Identifier Format
// =============================================================================

/// Builds a ticket identifier from a product tag and sequence number.
///
/// Format: `"{tag}_{sequence}"`. Uniqueness follows from the tag being
/// unique across products and the sequence being monotonic per product.
///
/// ## Example
/// ```rust
/// use labstock_core::ticket::format_ticket_id;
///
/// assert_eq!(format_ticket_id("GLOVE", 7), "GLOVE_7");
/// ```
pub fn format_ticket_id(tag: &str, sequence: i64) -> String {
    format!("{}_{}", tag, sequence)
}

/// Splits a ticket identifier back into `(tag, sequence)`.
///
/// The tag itself may contain underscores, so the split happens at the
/// LAST underscore; the trailing segment must parse as a positive number.
///
/// ## Example
/// ```rust
/// use labstock_core::ticket::parse_ticket_id;
///
/// let (tag, seq) = parse_ticket_id("PIPETTE_TIP_12").unwrap();
/// assert_eq!(tag, "PIPETTE_TIP");
/// assert_eq!(seq, 12);
/// ```
pub fn parse_ticket_id(ticket_id: &str) -> CoreResult<(String, i64)> {
    let (tag, seq) = ticket_id
        .rsplit_once('_')
        .ok_or_else(|| CoreError::InvalidTicketId(ticket_id.to_string()))?;

    if tag.is_empty() {
        return Err(CoreError::InvalidTicketId(ticket_id.to_string()));
    }

    let sequence: i64 = seq
        .parse()
        .map_err(|_| CoreError::InvalidTicketId(ticket_id.to_string()))?;

    if sequence < 1 {
        return Err(CoreError::InvalidTicketId(ticket_id.to_string()));
    }

    Ok((tag.to_string(), sequence))
}

// =============================================================================
// URL Encoding
// =============================================================================

/// Builds the URL a printed ticket encodes.
///
/// The ticket identifier rides in the `qrcode` query parameter so that the
/// same URL works as a camera-scanned payload and as a shareable page link.
///
/// ## Arguments
/// * `base_url` - Application base URL (e.g. `https://stock.example.org`)
/// * `ticket_id` - Identifier produced by [`format_ticket_id`]
pub fn ticket_url(base_url: &str, ticket_id: &str) -> CoreResult<String> {
    let mut url =
        Url::parse(base_url).map_err(|e| CoreError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;

    url.query_pairs_mut()
        .append_pair(TICKET_QUERY_PARAM, ticket_id);

    Ok(url.into())
}

/// Pulls the ticket identifier out of a scanned payload.
///
/// Camera decoders hand back whatever string the barcode carried. Only
/// payloads that parse as a URL and carry the `qrcode` parameter yield an
/// identifier; anything else (random barcodes, plain text) is ignored and
/// returns `None`.
pub fn extract_ticket_id(payload: &str) -> Option<String> {
    let url = Url::parse(payload).ok()?;

    url.query_pairs()
        .find(|(key, _)| key == TICKET_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
}

// =============================================================================
// QR Rendering
// =============================================================================

/// Renders the printable 2-D barcode for a ticket URL as an SVG document.
///
/// A pure function of the URL string; no state, no I/O. The caller saves or
/// serves the SVG for printing.
pub fn render_qr_svg(url: &str) -> CoreResult<String> {
    use qrcode::render::svg;
    use qrcode::QrCode;

    let code = QrCode::new(url.as_bytes()).map_err(|e| CoreError::QrEncoding(e.to_string()))?;

    let image = code
        .render::<svg::Color>()
        .min_dimensions(200, 200)
        .build();

    Ok(image)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ticket_id() {
        assert_eq!(format_ticket_id("GLOVE", 1), "GLOVE_1");
        assert_eq!(format_ticket_id("PIPETTE_TIP", 120), "PIPETTE_TIP_120");
    }

    #[test]
    fn test_parse_ticket_id_roundtrip() {
        let (tag, seq) = parse_ticket_id(&format_ticket_id("GLOVE", 42)).unwrap();
        assert_eq!(tag, "GLOVE");
        assert_eq!(seq, 42);
    }

    #[test]
    fn test_parse_ticket_id_underscore_tag() {
        let (tag, seq) = parse_ticket_id("PIPETTE_TIP_12").unwrap();
        assert_eq!(tag, "PIPETTE_TIP");
        assert_eq!(seq, 12);
    }

    #[test]
    fn test_parse_ticket_id_rejects_garbage() {
        assert!(parse_ticket_id("").is_err());
        assert!(parse_ticket_id("GLOVE").is_err());
        assert!(parse_ticket_id("GLOVE_").is_err());
        assert!(parse_ticket_id("_7").is_err());
        assert!(parse_ticket_id("GLOVE_zero").is_err());
        assert!(parse_ticket_id("GLOVE_0").is_err());
        assert!(parse_ticket_id("GLOVE_-3").is_err());
    }

    #[test]
    fn test_ticket_url() {
        let url = ticket_url("https://stock.example.org", "GLOVE_7").unwrap();
        assert_eq!(url, "https://stock.example.org/?qrcode=GLOVE_7");
    }

    #[test]
    fn test_ticket_url_rejects_bad_base() {
        assert!(ticket_url("not a url", "GLOVE_7").is_err());
    }

    #[test]
    fn test_extract_ticket_id() {
        let id = extract_ticket_id("https://stock.example.org/?qrcode=GLOVE_7");
        assert_eq!(id.as_deref(), Some("GLOVE_7"));
    }

    #[test]
    fn test_extract_ticket_id_roundtrip() {
        let url = ticket_url("https://stock.example.org", "PIPETTE_TIP_12").unwrap();
        assert_eq!(extract_ticket_id(&url).as_deref(), Some("PIPETTE_TIP_12"));
    }

    #[test]
    fn test_extract_ticket_id_ignores_foreign_payloads() {
        // Not a URL at all (e.g. a product EAN barcode)
        assert_eq!(extract_ticket_id("4901234567894"), None);
        // A URL without the parameter
        assert_eq!(extract_ticket_id("https://example.org/?page=2"), None);
        // Empty parameter value
        assert_eq!(extract_ticket_id("https://example.org/?qrcode="), None);
    }

    #[test]
    fn test_render_qr_svg() {
        let url = ticket_url("https://stock.example.org", "GLOVE_7").unwrap();
        let svg = render_qr_svg(&url).unwrap();
        assert!(svg.starts_with("<?xml") || svg.starts_with("<svg"));
        assert!(svg.contains("svg"));
    }
}
