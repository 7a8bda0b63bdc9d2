//! Recursive-descent parser for RIDL declaration files
//!
//! Grammar (informal):
//!
//! ```text
//! document   := package? import* declaration
//! package    := "package" dotted ";"
//! import     := "import" dotted ";"
//! declaration:= "oneway"? "interface" Ident "{" method* "}"
//!             | "parcelable" Ident ("." Ident)* ";"
//!             | "parcelable" Ident "from" string ";"
//! method     := "oneway"? type Ident "(" param ("," param)* ")" ";"
//! param      := ("in" | "out" | "inout")? type Ident
//! type       := dotted ("<" type ("," type)* ">")? "[]"?
//! dotted     := Ident ("." Ident)*
//! ```
//!
//! Direction defaults to `in` when omitted. Whether a missing package is
//! acceptable is a backend decision made later by the validator, not here.

use crate::error::{ParseError, Result};
use crate::lexer::{tokenize, SpannedToken, Token};
use ridl_core::ast::{
    Declaration, Direction, Document, Import, Interface, Method, NativeParcelable, Param,
    Parcelable, QualifiedName, TypeRef,
};

/// Parse one RIDL file into a [`Document`]
pub fn parse_document(path: &str, text: &str) -> Result<Document> {
    let tokens = tokenize(text)?;
    let mut parser = Parser::new(tokens);
    let document = parser.parse(path)?;
    log::debug!(
        "parsed {}: {} {}",
        path,
        document.decl.kind_keyword(),
        document.decl.name()
    );
    Ok(document)
}

struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<SpannedToken>) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn parse(&mut self, path: &str) -> Result<Document> {
        let package = if self.eat_keyword("package") {
            let (name, _) = self.parse_dotted()?;
            self.expect(&Token::Semi, ";")?;
            name
        } else {
            String::new()
        };

        let mut imports = Vec::new();
        while self.eat_keyword("import") {
            let (dotted, line) = self.parse_dotted()?;
            self.expect(&Token::Semi, ";")?;
            let name = QualifiedName::parse(&dotted)
                .map_err(|_| ParseError::InvalidName { line, name: dotted })?;
            imports.push(Import::new(name, line));
        }

        let decl = self.parse_declaration(&package)?;

        if let Some(extra) = self.peek() {
            return Err(ParseError::UnexpectedToken {
                line: extra.line,
                found: extra.token.describe(),
                expected: "end of file".to_string(),
            });
        }

        Ok(Document::new(path, imports, decl))
    }

    fn parse_declaration(&mut self, package: &str) -> Result<Declaration> {
        let oneway = self.eat_keyword("oneway");
        if self.eat_keyword("interface") {
            return self.parse_interface(package, oneway);
        }
        if oneway {
            // `oneway` may only precede an interface declaration.
            return self.unexpected("interface");
        }
        if self.eat_keyword("parcelable") {
            return self.parse_parcelable(package);
        }
        self.unexpected("interface or parcelable declaration")
    }

    fn parse_interface(&mut self, package: &str, oneway: bool) -> Result<Declaration> {
        let (local, line) = self.expect_ident("interface name")?;
        let name = self.qualified_name(package, &local, line)?;
        self.expect(&Token::LBrace, "{")?;

        let mut methods = Vec::new();
        while !self.eat(&Token::RBrace) {
            methods.push(self.parse_method()?);
        }

        Ok(Declaration::Interface(Interface {
            name,
            oneway,
            methods,
        }))
    }

    fn parse_method(&mut self) -> Result<Method> {
        let oneway = self.eat_keyword("oneway");
        let line = self.current_line();
        let return_type = self.parse_type()?;
        let (name, _) = self.expect_ident("method name")?;
        self.expect(&Token::LParen, "(")?;

        let mut params = Vec::new();
        if !self.eat(&Token::RParen) {
            loop {
                params.push(self.parse_param()?);
                if self.eat(&Token::Comma) {
                    continue;
                }
                self.expect(&Token::RParen, ") or ,")?;
                break;
            }
        }
        self.expect(&Token::Semi, ";")?;

        Ok(Method {
            name,
            oneway,
            return_type,
            params,
            line,
        })
    }

    fn parse_param(&mut self) -> Result<Param> {
        let direction = match self.peek_ident() {
            Some("in") => {
                self.advance();
                Direction::In
            }
            Some("out") => {
                self.advance();
                Direction::Out
            }
            Some("inout") => {
                self.advance();
                Direction::Inout
            }
            _ => Direction::In,
        };
        let ty = self.parse_type()?;
        let (name, _) = self.expect_ident("parameter name")?;
        Ok(Param {
            direction,
            ty,
            name,
        })
    }

    /// Parse a type reference, generic arguments and array suffix included.
    ///
    /// Generic spellings are normalized to the canonical no-space form
    /// (`List<Foo>`) so namespace lookups are spelling-stable.
    fn parse_type(&mut self) -> Result<TypeRef> {
        let (base, _) = self.parse_dotted()?;
        let mut spelling = base;
        if self.eat(&Token::Lt) {
            spelling.push('<');
            loop {
                let arg = self.parse_type()?;
                spelling.push_str(&arg.to_string());
                if self.eat(&Token::Comma) {
                    spelling.push(',');
                    continue;
                }
                self.expect(&Token::Gt, "> or ,")?;
                break;
            }
            spelling.push('>');
        }
        let is_array = if self.eat(&Token::LBracket) {
            self.expect(&Token::RBracket, "]")?;
            true
        } else {
            false
        };
        Ok(TypeRef {
            name: spelling,
            is_array,
        })
    }

    fn parse_parcelable(&mut self, package: &str) -> Result<Declaration> {
        let (first, line) = self.expect_ident("parcelable name")?;

        if self.eat(&Token::Dot) {
            // Outer-qualified local name: `parcelable Outer.Inner;`
            let mut local = first;
            loop {
                let (segment, _) = self.expect_ident("nested parcelable name")?;
                local.push('.');
                local.push_str(&segment);
                if !self.eat(&Token::Dot) {
                    break;
                }
            }
            self.expect(&Token::Semi, ";")?;
            let name = self.qualified_name(package, &local, line)?;
            return Ok(Declaration::Parcelable(Parcelable { name }));
        }

        if self.eat_keyword("from") {
            let header = self.expect_string("header path")?;
            self.expect(&Token::Semi, ";")?;
            let name = self.qualified_name(package, &first, line)?;
            return Ok(Declaration::NativeParcelable(NativeParcelable {
                name,
                header,
            }));
        }

        self.expect(&Token::Semi, ";")?;
        let name = self.qualified_name(package, &first, line)?;
        Ok(Declaration::Parcelable(Parcelable { name }))
    }

    fn qualified_name(&self, package: &str, local: &str, line: usize) -> Result<QualifiedName> {
        QualifiedName::new(package, local).map_err(|_| ParseError::InvalidName {
            line,
            name: format!("{package}.{local}"),
        })
    }

    /// Parse `Ident ("." Ident)*` and return the dotted spelling.
    fn parse_dotted(&mut self) -> Result<(String, usize)> {
        let (first, line) = self.expect_ident("name")?;
        let mut dotted = first;
        while self.eat(&Token::Dot) {
            let (segment, _) = self.expect_ident("name segment")?;
            dotted.push('.');
            dotted.push_str(&segment);
        }
        Ok((dotted, line))
    }

    // === Token cursor helpers ===

    fn peek(&self) -> Option<&SpannedToken> {
        self.tokens.get(self.pos)
    }

    fn peek_ident(&self) -> Option<&str> {
        match self.peek() {
            Some(SpannedToken {
                token: Token::Ident(name),
                ..
            }) => Some(name.as_str()),
            _ => None,
        }
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn current_line(&self) -> usize {
        self.peek()
            .map(|t| t.line)
            .or_else(|| self.tokens.last().map(|t| t.line))
            .unwrap_or(1)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek().map(|t| &t.token) == Some(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.peek_ident() == Some(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token, expected: &str) -> Result<()> {
        match self.peek() {
            Some(t) if &t.token == token => {
                self.advance();
                Ok(())
            }
            Some(t) => Err(ParseError::UnexpectedToken {
                line: t.line,
                found: t.token.describe(),
                expected: expected.to_string(),
            }),
            None => Err(ParseError::UnexpectedEof {
                expected: expected.to_string(),
            }),
        }
    }

    fn expect_ident(&mut self, expected: &str) -> Result<(String, usize)> {
        match self.peek().cloned() {
            Some(SpannedToken {
                token: Token::Ident(name),
                line,
            }) => {
                self.advance();
                Ok((name, line))
            }
            Some(t) => Err(ParseError::UnexpectedToken {
                line: t.line,
                found: t.token.describe(),
                expected: expected.to_string(),
            }),
            None => Err(ParseError::UnexpectedEof {
                expected: expected.to_string(),
            }),
        }
    }

    fn expect_string(&mut self, expected: &str) -> Result<String> {
        match self.peek().cloned() {
            Some(SpannedToken {
                token: Token::Str(value),
                ..
            }) => {
                self.advance();
                Ok(value)
            }
            Some(t) => Err(ParseError::UnexpectedToken {
                line: t.line,
                found: t.token.describe(),
                expected: expected.to_string(),
            }),
            None => Err(ParseError::UnexpectedEof {
                expected: expected.to_string(),
            }),
        }
    }

    fn unexpected<T>(&self, expected: &str) -> Result<T> {
        match self.peek() {
            Some(t) => Err(ParseError::UnexpectedToken {
                line: t.line,
                found: t.token.describe(),
                expected: expected.to_string(),
            }),
            None => Err(ParseError::UnexpectedEof {
                expected: expected.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_interface() {
        let doc = parse_document("IFoo.ridl", "interface IFoo { }").unwrap();
        let interface = match &doc.decl {
            Declaration::Interface(i) => i,
            other => panic!("expected interface, got {other:?}"),
        };
        assert_eq!(interface.name.qualified(), "IFoo");
        assert!(!interface.name.has_package());
        assert!(interface.methods.is_empty());
    }

    #[test]
    fn test_parse_package_and_imports() {
        let doc = parse_document(
            "p/IFoo.ridl",
            "package p;\nimport one.IBar;\nimport two.Baz;\ninterface IFoo {}",
        )
        .unwrap();
        assert_eq!(doc.imports.len(), 2);
        assert_eq!(doc.imports[0].name.qualified(), "one.IBar");
        assert_eq!(doc.imports[1].name.qualified(), "two.Baz");
        assert_eq!(doc.decl.name().qualified(), "p.IFoo");
    }

    #[test]
    fn test_parse_method_directions() {
        let doc = parse_document(
            "a/IFoo.ridl",
            "package a; interface IFoo { int f(in int x, out String s, inout IBar b, long d); }",
        )
        .unwrap();
        let interface = match &doc.decl {
            Declaration::Interface(i) => i,
            other => panic!("expected interface, got {other:?}"),
        };
        let method = &interface.methods[0];
        assert_eq!(method.name, "f");
        assert_eq!(method.return_type, TypeRef::new("int"));
        let directions: Vec<Direction> = method.params.iter().map(|p| p.direction).collect();
        assert_eq!(
            directions,
            vec![
                Direction::In,
                Direction::Out,
                Direction::Inout,
                Direction::In
            ]
        );
    }

    #[test]
    fn test_parse_oneway_flags() {
        let doc =
            parse_document("a/IBar.ridl", "package a; oneway interface IBar { void f(int a); }")
                .unwrap();
        match &doc.decl {
            Declaration::Interface(i) => {
                assert!(i.oneway);
                assert!(!i.methods[0].oneway);
            }
            other => panic!("expected interface, got {other:?}"),
        }

        let doc = parse_document(
            "a/IFoo.ridl",
            "package a; interface IFoo { oneway void f(int a); }",
        )
        .unwrap();
        match &doc.decl {
            Declaration::Interface(i) => {
                assert!(!i.oneway);
                assert!(i.methods[0].oneway);
            }
            other => panic!("expected interface, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_array_and_generic_types() {
        let doc = parse_document(
            "a/IFoo.ridl",
            "package a; interface IFoo { void f(in IBar[] input, in List<Foo> l, in Map<String,Foo> m); }",
        )
        .unwrap();
        let interface = match &doc.decl {
            Declaration::Interface(i) => i,
            other => panic!("expected interface, got {other:?}"),
        };
        let params = &interface.methods[0].params;
        assert_eq!(params[0].ty, TypeRef::array("IBar"));
        assert_eq!(params[1].ty, TypeRef::new("List<Foo>"));
        assert_eq!(params[2].ty, TypeRef::new("Map<String,Foo>"));
    }

    #[test]
    fn test_parse_simple_parcelable() {
        let doc = parse_document("p/Foo.ridl", "package p; parcelable Foo;").unwrap();
        match &doc.decl {
            Declaration::Parcelable(p) => assert_eq!(p.name.qualified(), "p.Foo"),
            other => panic!("expected parcelable, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_compound_parcelable() {
        let doc = parse_document("p/Outer.ridl", "package p; parcelable Outer.Inner;").unwrap();
        match &doc.decl {
            Declaration::Parcelable(p) => {
                assert!(p.name.is_compound());
                assert_eq!(p.name.qualified(), "p.Outer.Inner");
                assert_eq!(p.name.local_name(), "Outer.Inner");
            }
            other => panic!("expected parcelable, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_native_parcelable() {
        let doc =
            parse_document("p/Bar.ridl", "package p; parcelable Bar from \"baz/header\";").unwrap();
        match &doc.decl {
            Declaration::NativeParcelable(p) => {
                assert_eq!(p.name.qualified(), "p.Bar");
                assert_eq!(p.header, "baz/header");
            }
            other => panic!("expected native parcelable, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_semicolon_is_an_error() {
        let err = parse_document("p/Foo.ridl", "package p\nparcelable Foo;").unwrap_err();
        match err {
            ParseError::UnexpectedToken { line, .. } => assert_eq!(line, 2),
            other => panic!("expected UnexpectedToken, got {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_interface_is_an_error() {
        let err = parse_document("a/IFoo.ridl", "package a; interface IFoo { void f();").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_oneway_parcelable_is_an_error() {
        let err = parse_document("p/Foo.ridl", "package p; oneway parcelable Foo;").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_trailing_tokens_are_an_error() {
        let err =
            parse_document("a/IFoo.ridl", "package a; interface IFoo {} interface IBar {}")
                .unwrap_err();
        match err {
            ParseError::UnexpectedToken { expected, .. } => {
                assert_eq!(expected, "end of file");
            }
            other => panic!("expected UnexpectedToken, got {other:?}"),
        }
    }
}
