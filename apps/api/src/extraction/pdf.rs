use super::ExtractionError;

/// Extracts text from every page of a PDF, in page order.
pub fn extract_pdf_text(data: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(data).map_err(|e| ExtractionError::Pdf(e.to_string()))
}
