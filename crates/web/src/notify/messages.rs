//! Notification message builders.
//!
//! Messages use Telegram's HTML parse mode, so every user-supplied value is
//! escaped before it is interpolated.

use deposit_core::CurrencyCode;

use crate::models::IntakeRecord;

/// Escape text for Telegram HTML parse mode.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Build the message announcing a new intake.
#[must_use]
pub fn build_intake_message(record: &IntakeRecord, currency: CurrencyCode) -> String {
    format!(
        "<b>📦 New deposit intake</b>\n\
         👤 Customer: <b>{name}</b>\n\
         📧 Email: {email}\n\
         📞 Phone: {phone}\n\
         🛋️ Items: {items}\n\
         📏 Volume: <b>{volume} m³</b>\n\
         💰 Estimated price: <b>{symbol}{price} {code}</b>\n\
         📦 Recommended box: <b>{box_label}</b>",
        name = escape_html(&record.customer_name),
        email = escape_html(&record.customer_email),
        phone = escape_html(record.phone_display()),
        items = escape_html(&record.item_description),
        volume = record.volume_m3,
        symbol = currency.symbol(),
        price = escape_html(&record.quoted_price),
        code = currency.code(),
        box_label = escape_html(&record.recommended_box),
    )
}
