use crate::error::AppError;
use printpdf::path::PaintMode;
use printpdf::{BuiltinFont, Color, Mm, PdfDocument, Rect, Rgb};
use qrcode::{Color as QrColor, QrCode};

// A6 portrait
const PAGE_WIDTH_MM: f32 = 105.0;
const PAGE_HEIGHT_MM: f32 = 148.0;
const QR_SIZE_MM: f32 = 28.0;

pub struct TicketData<'a> {
    pub attendee_name: &'a str,
    pub attendee_email: &'a str,
    pub event_title: &'a str,
    pub venue_name: &'a str,
    pub venue_location: &'a str,
    pub event_date: &'a str,
    pub event_time: &'a str,
    pub ticket_type: &'a str,
}

/// Renders the A6 ticket: bordered page, colored header band, the
/// registration details and a QR code encoding the holder + event.
pub fn generate_ticket_pdf(ticket: &TicketData<'_>) -> Result<Vec<u8>, AppError> {
    let (doc, page, layer) = PdfDocument::new("Event Ticket", Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "ticket");
    let layer = doc.get_page(page).get_layer(layer);

    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::InternalWithMsg(format!("PDF font error: {}", e)))?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::InternalWithMsg(format!("PDF font error: {}", e)))?;

    // Outer border
    layer.set_outline_color(Color::Rgb(Rgb::new(0.2, 0.2, 0.2, None)));
    layer.set_outline_thickness(1.0);
    layer.add_rect(Rect::new(Mm(4.0), Mm(4.0), Mm(PAGE_WIDTH_MM - 4.0), Mm(PAGE_HEIGHT_MM - 4.0)).with_mode(PaintMode::Stroke));

    // Header band
    layer.set_fill_color(Color::Rgb(Rgb::new(0.18, 0.53, 0.76, None)));
    layer.add_rect(Rect::new(Mm(4.0), Mm(PAGE_HEIGHT_MM - 18.0), Mm(PAGE_WIDTH_MM - 4.0), Mm(PAGE_HEIGHT_MM - 4.0)).with_mode(PaintMode::Fill));

    layer.set_fill_color(Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None)));
    layer.use_text("Event Ticket", 18.0, Mm(9.0), Mm(PAGE_HEIGHT_MM - 14.5), &bold);

    // Details
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    let lines = [
        format!("Name: {}", ticket.attendee_name),
        format!("Email: {}", ticket.attendee_email),
        format!("Event: {}", ticket.event_title),
        format!("Venue: {} ({})", ticket.venue_name, ticket.venue_location),
        format!("Date: {}", ticket.event_date),
        format!("Time: {}", ticket.event_time),
        format!("Ticket Type: {}", ticket.ticket_type),
    ];

    let mut y = PAGE_HEIGHT_MM - 28.0;
    for line in &lines {
        layer.use_text(line.as_str(), 11.0, Mm(9.0), Mm(y), &regular);
        y -= 7.0;
    }

    // QR code, drawn module by module
    let qr_data = format!("Ticket for {} | {}", ticket.attendee_email, ticket.event_title);
    let code = QrCode::new(qr_data.as_bytes())
        .map_err(|e| AppError::InternalWithMsg(format!("QR encoding error: {}", e)))?;
    let modules = code.to_colors();
    let width = code.width();

    let module_mm = QR_SIZE_MM / width as f32;
    let qr_left = (PAGE_WIDTH_MM - QR_SIZE_MM) / 2.0;
    let qr_top = 48.0;

    for (idx, module) in modules.iter().enumerate() {
        if *module != QrColor::Dark {
            continue;
        }
        let col = (idx % width) as f32;
        let row = (idx / width) as f32;
        let x = qr_left + col * module_mm;
        let y_bottom = qr_top - (row + 1.0) * module_mm;
        layer.add_rect(
            Rect::new(Mm(x), Mm(y_bottom), Mm(x + module_mm), Mm(y_bottom + module_mm))
                .with_mode(PaintMode::Fill),
        );
    }

    // Footer
    layer.set_fill_color(Color::Rgb(Rgb::new(0.53, 0.53, 0.53, None)));
    layer.use_text("Please bring this ticket to the event.", 9.0, Mm(24.0), Mm(10.0), &regular);

    doc.save_to_bytes()
        .map_err(|e| AppError::InternalWithMsg(format!("PDF rendering error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_pdf_is_well_formed() {
        let ticket = TicketData {
            attendee_name: "Alice",
            attendee_email: "alice@example.com",
            event_title: "RustConf 2025",
            venue_name: "City Hall",
            venue_location: "Berlin",
            event_date: "2025-09-12",
            event_time: "18:30",
            ticket_type: "VIP",
        };

        let bytes = generate_ticket_pdf(&ticket).unwrap();
        assert!(bytes.starts_with(b"%PDF"), "output is not a PDF");
        assert!(bytes.len() > 1000, "suspiciously small PDF: {} bytes", bytes.len());
    }
}
