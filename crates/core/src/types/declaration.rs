use serde::{Deserialize, Serialize};

/// A trait marked for mapping generation, as delivered by interface discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDeclaration {
    pub name: String,
    /// Module the trait is declared in, e.g. `crate::demo::asm`
    pub module_path: String,
    /// `use` paths visible to the trait, in declaration order
    pub dependencies: Vec<String>,
    pub methods: Vec<MethodDeclaration>,
}

impl InterfaceDeclaration {
    pub fn new(name: impl Into<String>, module_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module_path: module_path.into(),
            dependencies: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_dependency(mut self, path: impl Into<String>) -> Self {
        self.dependencies.push(path.into());
        self
    }

    pub fn with_method(mut self, method: MethodDeclaration) -> Self {
        self.methods.push(method);
        self
    }
}

/// One trait method signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    pub name: String,
    /// Receiver text (`&self`, `&mut self`, `self`) if the method has one
    pub receiver: Option<String>,
    pub params: Vec<Param>,
    /// Result types; `Result<T, E>` contributes only `T`
    pub results: Vec<String>,
    /// Return type exactly as written, if any
    pub return_type: Option<String>,
    /// Whether the return type is `Result<T, E>`
    pub fallible: bool,
    /// Raw comments attached above the signature, top to bottom
    pub comments: Vec<String>,
}

impl MethodDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            receiver: Some("&self".to_string()),
            params: Vec::new(),
            results: Vec::new(),
            return_type: None,
            fallible: false,
            comments: Vec::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.params.push(Param {
            name: name.into(),
            ty: ty.into(),
        });
        self
    }

    /// Set a plain (infallible) return type
    pub fn returning(mut self, ty: impl Into<String>) -> Self {
        let ty = ty.into();
        self.results = vec![ty.clone()];
        self.return_type = Some(ty);
        self.fallible = false;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments.push(comment.into());
        self
    }
}

/// A named, typed parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: String,
}
