use crate::data_models::ContactSubmission;

/// Text that came from a visitor and ends up inside an HTML mail body.
pub trait ExternalText {
    fn escaped(&self) -> Self;

    fn escape(&self, value: &str) -> String {
        let mut escaped = String::with_capacity(value.len());
        for c in value.chars() {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#39;"),
                _ => escaped.push(c),
            }
        }
        escaped
    }
}

impl ExternalText for ContactSubmission {
    fn escaped(&self) -> Self {
        Self {
            name: self.escape(&self.name),
            email: self.escape(&self.email),
            phone: self.escape(&self.phone),
            message: self.escape(&self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escaped_works() {
        let submission = ContactSubmission {
            name: "Tom & Jerry".to_string(),
            email: "tom@example.com".to_string(),
            phone: "1234567890".to_string(),
            message: "HI <b> Myname </b> <script> var p = 'x'; </script>".to_string(),
        };
        let escaped = submission.escaped();
        assert_eq!(escaped.name, "Tom &amp; Jerry");
        assert_eq!(escaped.email, submission.email);
        assert_eq!(
            escaped.message,
            "HI &lt;b&gt; Myname &lt;/b&gt; &lt;script&gt; var p = &#39;x&#39;; &lt;/script&gt;"
        )
    }
}
