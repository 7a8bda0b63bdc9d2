//! Semantic validator
//!
//! Walks a parsed document against the resolved type namespace and
//! enforces the declaration-level rules:
//! - backend-dependent package requirements
//! - oneway methods return void and take no out/inout parameters
//! - no arrays of interface references
//! - every referenced type name resolves

use crate::error::{CompileError, Result};
use crate::namespace::{TypeKind, TypeNamespace};
use ridl_core::ast::{Declaration, Document, Interface, Method, TypeRef};

/// Semantic validator over one backend's type namespace
pub struct Validator<'a> {
    types: &'a mut dyn TypeNamespace,
}

impl<'a> Validator<'a> {
    /// Create a validator
    pub fn new(types: &'a mut dyn TypeNamespace) -> Self {
        Validator { types }
    }

    /// Validate one document; no partial result on failure
    pub fn validate_document(&mut self, document: &Document) -> Result<()> {
        match &document.decl {
            Declaration::Interface(interface) => self.validate_interface(interface),
            // Parcelable declarations carry no methods and no package
            // requirement; there is nothing to validate here.
            Declaration::Parcelable(_) | Declaration::NativeParcelable(_) => Ok(()),
        }
    }

    fn validate_interface(&mut self, interface: &Interface) -> Result<()> {
        if self.types.requires_package_on_interface() && !interface.name.has_package() {
            return Err(CompileError::Validation(format!(
                "interface {} is missing a package declaration",
                interface.name
            )));
        }
        for method in &interface.methods {
            self.validate_method(interface, method)?;
        }
        Ok(())
    }

    fn validate_method(&mut self, interface: &Interface, method: &Method) -> Result<()> {
        if method.is_oneway(interface.oneway) {
            if !method.return_type.is_void() {
                return Err(CompileError::Validation(format!(
                    "oneway method {}.{} must return void, not {}",
                    interface.name, method.name, method.return_type
                )));
            }
            if let Some(param) = method.params.iter().find(|p| p.direction.is_outgoing()) {
                return Err(CompileError::Validation(format!(
                    "oneway method {}.{} cannot have {} parameter '{}'",
                    interface.name, method.name, param.direction, param.name
                )));
            }
        }

        self.check_type(&method.return_type, method)?;
        for param in &method.params {
            self.check_type(&param.ty, method)?;
        }
        Ok(())
    }

    /// Resolve one type reference and apply the array rules.
    ///
    /// Container spellings are synthesized on first use, which only
    /// succeeds once their element types are known.
    fn check_type(&mut self, ty: &TypeRef, method: &Method) -> Result<()> {
        if !self.types.has_type(&ty.name)
            && ty.name.contains('<')
            && self.types.maybe_add_container_type(&ty.name)
        {
            log::debug!("synthesized container type {}", ty.name);
        }
        let kind = match self.types.find(&ty.name) {
            Some(descriptor) => descriptor.kind(),
            None => {
                return Err(CompileError::Resolution(format!(
                    "unknown type {} in method {} (line {})",
                    ty, method.name, method.line
                )))
            }
        };
        if ty.is_array && kind == TypeKind::Interface {
            return Err(CompileError::Validation(format!(
                "method {} (line {}): arrays of interface references like {} are not allowed",
                method.name, method.line, ty
            )));
        }
        Ok(())
    }
}
