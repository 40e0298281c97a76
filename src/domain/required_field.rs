/// A submission field that has to carry some text.
#[derive(Debug, Clone)]
pub struct RequiredField(String);

impl RequiredField {
    pub fn parse(s: String, field_name: &str) -> Result<RequiredField, String> {
        if s.is_empty() {
            Err(format!("`{}` must not be empty", field_name))
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for RequiredField {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
