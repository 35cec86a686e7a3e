use std::path::PathBuf;

/// Grammar flavour used to parse a TypeScript source file
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LanguageVariant {
    /// Plain TypeScript (`.ts`, `.d.ts`, `.mts`, `.cts`)
    TypeScript,
    /// TypeScript with JSX (`.tsx`)
    Tsx,
}

impl LanguageVariant {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TypeScriptAst {
    pub tree: tree_sitter::Tree,
    pub source: String,
    pub path: PathBuf,
    pub variant: LanguageVariant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_from_extension() {
        assert_eq!(LanguageVariant::from_extension("tsx"), Some(LanguageVariant::Tsx));
        assert_eq!(
            LanguageVariant::from_extension("ts"),
            Some(LanguageVariant::TypeScript)
        );
        assert_eq!(LanguageVariant::from_extension("js"), None);
    }
}
