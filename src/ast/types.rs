use std::fmt::Display;

use crate::Span;

/// Parser-assigned identity of a generic-name part, unique within a compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameId(pub u32);

/// One dot-separated segment of a [`GenericName`], e.g. `Map<string, int>`.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericNamePart {
    pub id: NameId,
    pub name: String,
    pub generics: Vec<GenericName>,
    pub span: Span,
}

/// A possibly dot-qualified, possibly generic-parameterized name such as
/// `geometry.Pair<int, Box<string>>`. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericName {
    pub parts: Vec<GenericNamePart>,
    pub span: Span,
}

impl GenericName {
    /// The plain segment names, generics dropped.
    pub fn to_path(&self) -> Vec<String> {
        self.parts.iter().map(|part| part.name.clone()).collect()
    }
}

impl Display for GenericNamePart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.generics.is_empty() {
            let generics: Vec<String> = self.generics.iter().map(|g| g.to_string()).collect();
            write!(f, "<{}>", generics.join(", "))?;
        }
        Ok(())
    }
}

impl Display for GenericName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.parts.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// A declared generic parameter: `T` or `T: Bound`.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericDeclaration {
    pub name: String,
    pub extends: Option<GenericName>,
    pub span: Span,
}
