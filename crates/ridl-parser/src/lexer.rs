//! Lexical analysis for RIDL declaration files
//!
//! Tokenization uses logos. Whitespace and `//` / `/* */` comments are
//! stripped during lexing and never reach the parser. Keywords (`package`,
//! `interface`, `oneway`, `in`, ...) are contextual: they lex as plain
//! identifiers and are matched by spelling in the parser.

use crate::error::{ParseError, Result};
use logos::Logos;

/// A RIDL token
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip(r"//[^\n]*", allow_greedy = true))]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
pub enum Token {
    /// ASCII identifier, including contextual keywords
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    /// Double-quoted string literal, quotes stripped
    #[regex(r#""[^"\n]*""#, |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].to_string()
    })]
    Str(String),

    #[token(".")]
    Dot,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
}

impl Token {
    /// Human-readable spelling for diagnostics
    pub fn describe(&self) -> String {
        match self {
            Token::Ident(name) => name.clone(),
            Token::Str(s) => format!("\"{s}\""),
            Token::Dot => ".".to_string(),
            Token::Semi => ";".to_string(),
            Token::Comma => ",".to_string(),
            Token::LBrace => "{".to_string(),
            Token::RBrace => "}".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::Lt => "<".to_string(),
            Token::Gt => ">".to_string(),
            Token::LBracket => "[".to_string(),
            Token::RBracket => "]".to_string(),
        }
    }
}

/// A token plus the 1-based source line it starts on
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub line: usize,
}

/// Tokenize a whole file, failing on the first unrecognized character
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);
    while let Some(result) = lexer.next() {
        let line = line_of(source, lexer.span().start);
        match result {
            Ok(token) => tokens.push(SpannedToken { token, line }),
            Err(()) => return Err(ParseError::UnexpectedCharacter { line }),
        }
    }
    Ok(tokens)
}

fn line_of(source: &str, offset: usize) -> usize {
    source[..offset].bytes().filter(|&b| b == b'\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_interface() {
        let tokens = tokenize("interface IFoo { }").unwrap();
        let kinds: Vec<Token> = tokens.into_iter().map(|t| t.token).collect();
        assert_eq!(
            kinds,
            vec![
                Token::Ident("interface".to_string()),
                Token::Ident("IFoo".to_string()),
                Token::LBrace,
                Token::RBrace,
            ]
        );
    }

    #[test]
    fn test_tokenize_skips_comments() {
        let source = "// header\npackage a; /* inline */ interface IFoo {}";
        let tokens = tokenize(source).unwrap();
        assert_eq!(tokens[0].token, Token::Ident("package".to_string()));
        assert_eq!(tokens[0].line, 2);
    }

    #[test]
    fn test_tokenize_skips_comments_with_trailing_stars() {
        // The comment body may end in any run of stars before the closer.
        let tokens = tokenize("/* doc **/ interface IFoo { }").unwrap();
        assert_eq!(tokens[0].token, Token::Ident("interface".to_string()));
        assert!(tokenize("/*** banner ***/ parcelable Foo;").is_ok());
    }

    #[test]
    fn test_tokenize_string_literal() {
        let tokens = tokenize(r#"parcelable Bar from "baz/header";"#).unwrap();
        assert!(tokens
            .iter()
            .any(|t| t.token == Token::Str("baz/header".to_string())));
    }

    #[test]
    fn test_tokenize_reports_line_numbers() {
        let tokens = tokenize("package a;\nimport b.C;\n").unwrap();
        let import = tokens
            .iter()
            .find(|t| t.token == Token::Ident("import".to_string()))
            .unwrap();
        assert_eq!(import.line, 2);
    }

    #[test]
    fn test_tokenize_rejects_unknown_character() {
        let err = tokenize("interface IFoo {\n  void f(in int %);\n}").unwrap_err();
        assert_eq!(err, ParseError::UnexpectedCharacter { line: 2 });
    }
}
