/// Settings shared by every front-end stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendConfig {
    /// Primitive type names registered at the root of the symbol tree.
    pub builtin_types: Vec<String>,
    /// Functions callable without a declaration.
    pub builtin_functions: Vec<String>,
    /// File name used in positions when the caller gives none.
    pub default_file_name: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        FrontendConfig {
            builtin_types: ["void", "boolean", "char", "string", "int", "double"]
                .iter()
                .map(|name| name.to_string())
                .collect(),
            builtin_functions: vec![String::from("println")],
            default_file_name: String::from("shell"),
        }
    }
}

impl FrontendConfig {
    pub fn with_builtin_type(mut self, name: &str) -> Self {
        self.builtin_types.push(name.to_string());
        self
    }

    pub fn with_builtin_function(mut self, name: &str) -> Self {
        self.builtin_functions.push(name.to_string());
        self
    }
}
