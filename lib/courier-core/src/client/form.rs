use uuid::Uuid;

use super::sniff::sniff_mime_type;

/// A `multipart/form-data` body under construction.
///
/// Each form owns a random boundary generated once at creation; it is used both in
/// the body framing and in the `Content-Type` header of the request carrying the form.
/// Fields are encoded as they are added and keep their insertion order.
///
/// # Example
///
/// ```rust
/// use courier_core::MultipartForm;
///
/// let form = MultipartForm::new()
///     .add_text_field("title", "hello")
///     .add_data_field("file", vec![0x89, 0x50, 0x4E, 0x47]);
///
/// let content_type = form.content_type();
/// assert!(content_type.starts_with("multipart/form-data; boundary="));
/// ```
#[derive(Clone, derive_more::Debug)]
pub struct MultipartForm {
    boundary: String,
    #[debug(ignore)]
    body: Vec<u8>,
}

impl MultipartForm {
    /// Creates an empty form with a fresh boundary.
    #[must_use]
    pub fn new() -> Self {
        let boundary = format!("{:X}", Uuid::new_v4().hyphenated());
        Self {
            boundary,
            body: Vec::new(),
        }
    }

    /// The boundary delimiting the parts of this form.
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// The `Content-Type` header value matching this form's framing.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Appends a plain text field.
    #[must_use]
    pub fn add_text_field(mut self, name: &str, value: &str) -> Self {
        let boundary = &self.boundary;
        let part = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"{name}\"\r\n\
             Content-Type: text/plain; charset=ISO-8859-1\r\n\
             Content-Transfer-Encoding: 8bit\r\n\
             \r\n\
             {value}\r\n"
        );
        self.body.extend_from_slice(part.as_bytes());
        self
    }

    /// Appends a binary field.
    ///
    /// The part's filename is the field name, and its content type is sniffed
    /// from the first byte of `data` (see [`sniff_mime_type`](crate::sniff_mime_type)).
    #[must_use]
    pub fn add_data_field(mut self, name: &str, data: impl AsRef<[u8]>) -> Self {
        let data = data.as_ref();
        let boundary = &self.boundary;
        let mime_type = sniff_mime_type(data);
        let header = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"{name}\"; filename=\"{name}\"\r\n\
             Content-Type: {mime_type}\r\n\
             \r\n"
        );
        self.body.extend_from_slice(header.as_bytes());
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Closes the form and returns the complete body.
    ///
    /// Consuming the form guarantees the closing delimiter is written exactly once.
    #[must_use]
    pub fn into_body(self) -> Vec<u8> {
        let Self { boundary, mut body } = self;
        body.extend_from_slice(format!("--{boundary}--").as_bytes());
        body
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_text(form: MultipartForm) -> String {
        let boundary = form.boundary().to_string();
        String::from_utf8_lossy(&form.into_body()).replace(&boundary, "BOUNDARY")
    }

    #[test]
    fn should_generate_distinct_boundaries() {
        let first = MultipartForm::new();
        let second = MultipartForm::new();

        assert_ne!(first.boundary(), second.boundary());
        assert_eq!(first.boundary().len(), 36);
        assert!(Uuid::parse_str(first.boundary()).is_ok());
    }

    #[test]
    fn should_keep_boundary_stable_while_adding_fields() {
        let form = MultipartForm::new();
        let boundary = form.boundary().to_string();

        let form = form.add_text_field("a", "1").add_data_field("b", [1_u8, 2]);

        assert_eq!(form.boundary(), boundary);
        assert_eq!(
            form.content_type(),
            format!("multipart/form-data; boundary={boundary}")
        );
    }

    #[test]
    fn should_encode_empty_form() {
        let text = body_text(MultipartForm::new());

        insta::assert_snapshot!(text, @"--BOUNDARY--");
    }

    #[test]
    fn should_encode_text_fields_in_order() {
        let form = MultipartForm::new()
            .add_text_field("a", "1")
            .add_text_field("b", "2");

        let text = body_text(form);

        insta::assert_debug_snapshot!(text, @r#""--BOUNDARY\r\nContent-Disposition: form-data; name=\"a\"\r\nContent-Type: text/plain; charset=ISO-8859-1\r\nContent-Transfer-Encoding: 8bit\r\n\r\n1\r\n--BOUNDARY\r\nContent-Disposition: form-data; name=\"b\"\r\nContent-Type: text/plain; charset=ISO-8859-1\r\nContent-Transfer-Encoding: 8bit\r\n\r\n2\r\n--BOUNDARY--""#);
    }

    #[test]
    fn should_encode_data_field_with_sniffed_type_and_name_as_filename() {
        let form = MultipartForm::new()
            .add_text_field("title", "hello")
            .add_data_field("file", b"%PDF");

        let text = body_text(form);

        insta::assert_debug_snapshot!(text, @r#""--BOUNDARY\r\nContent-Disposition: form-data; name=\"title\"\r\nContent-Type: text/plain; charset=ISO-8859-1\r\nContent-Transfer-Encoding: 8bit\r\n\r\nhello\r\n--BOUNDARY\r\nContent-Disposition: form-data; name=\"file\"; filename=\"file\"\r\nContent-Type: application/pdf\r\n\r\n%PDF\r\n--BOUNDARY--""#);
    }

    #[test]
    fn should_keep_binary_payload_untouched() {
        let payload = [0x89_u8, 0x00, 0xFF, 0x0D, 0x0A];
        let form = MultipartForm::new().add_data_field("blob", payload);
        let boundary = form.boundary().to_string();

        let body = form.into_body();

        let header = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"blob\"; filename=\"blob\"\r\nContent-Type: image/png\r\n\r\n"
        );
        let mut expected = header.into_bytes();
        expected.extend_from_slice(&payload);
        expected.extend_from_slice(format!("\r\n--{boundary}--").as_bytes());
        assert_eq!(body, expected);
    }

    #[test]
    fn should_default_to_octet_stream_for_empty_data() {
        let text = body_text(MultipartForm::new().add_data_field("empty", Vec::<u8>::new()));

        assert!(text.contains("Content-Type: application/octet-stream\r\n\r\n\r\n"));
    }
}
