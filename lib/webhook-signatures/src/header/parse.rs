use super::ParsedHeader;
use logos::{Lexer, Logos, Span};
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Header doesn't follow the `key=value,key=value` grammar
#[derive(Clone, Debug, Diagnostic, Error, PartialEq, Eq)]
#[error("Malformed signature header")]
#[diagnostic(
    code(webhook_signatures::header::malformed),
    help("expected `t=<epoch>,s=<submissionId>,f=<formId>,v1=<signature>`")
)]
pub struct ParseError {
    /// Location of the offending segment
    #[label("expected `key=value` here")]
    pub span: SourceSpan,
}

impl From<Span> for ParseError {
    fn from(value: Span) -> Self {
        Self { span: value.into() }
    }
}

#[derive(Debug, Logos)]
enum TokenTy {
    #[regex(r"[^,=]+")]
    Text,

    #[token("=")]
    Equals,

    #[token(",")]
    Comma,
}

#[derive(Debug)]
struct Token {
    pub ty: TokenTy,
    pub span: Span,
}

impl Token {
    pub fn lex(input: &str) -> impl Iterator<Item = Result<Token, Span>> + '_ {
        Lexer::<'_, TokenTy>::new(input)
            .spanned()
            .map(|(ty, span)| match ty {
                Ok(ty) => Ok(Token { ty, span }),
                Err(()) => Err(span),
            })
    }
}

macro_rules! ensure {
    ($self:expr, $token:expr, $pattern:pat, $fallback:expr) => {{
        match $token {
            Some(Ok(token)) if matches!(token.ty, $pattern) => token,
            Some(Ok(Token { span, .. }) | Err(span)) => return Some(Err($self.fail(span))),
            None => return Some(Err($self.fail($fallback))),
        }
    }};
}

struct ParseIter<'a, I> {
    /// Stream of tokens
    inner: I,

    /// Reference to the original input that was fed to the lexer
    input: &'a str,

    /// Set at the start and after every comma. Running out of tokens while this is set means an empty segment
    expects_segment: bool,

    /// Marker whether we encountered an illegal token
    ///
    /// If we did, the iterator will stop yielding any results
    is_broken: bool,
}

impl<I> ParseIter<'_, I> {
    fn fail(&mut self, span: Span) -> ParseError {
        self.is_broken = true;
        span.into()
    }
}

impl<'a, I> Iterator for ParseIter<'a, I>
where
    I: Iterator<Item = Result<Token, Span>>,
{
    type Item = Result<(&'a str, &'a str), ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_broken {
            return None;
        }

        let end_of_input = self.input.len()..self.input.len();
        let first = self.inner.next();
        if first.is_none() && !self.expects_segment {
            return None;
        }
        self.expects_segment = false;

        let key = ensure!(self, first, TokenTy::Text, end_of_input);
        let equals = match self.inner.next() {
            Some(Ok(token)) if matches!(token.ty, TokenTy::Equals) => token,
            _ => return Some(Err(self.fail(key.span.clone()))),
        };

        // The key ends at the first `=`. Everything up to the next comma is the value (base64 padding included)
        let value_start = equals.span.end;
        let mut value_end = value_start;
        loop {
            match self.inner.next() {
                None => break,
                Some(Ok(Token {
                    ty: TokenTy::Comma, ..
                })) => {
                    self.expects_segment = true;
                    break;
                }
                Some(Ok(token)) => value_end = token.span.end,
                Some(Err(span)) => return Some(Err(self.fail(span))),
            }
        }

        let key = &self.input[key.span];
        let value = &self.input[value_start..value_end];

        Some(Ok((key, value)))
    }
}

/// Parse a signature header into its fields
///
/// Missing fields are not an error at this stage. Unknown keys are ignored, a repeated key keeps its last value.
#[inline]
pub fn parse(input: &str) -> Result<ParsedHeader<'_>, ParseError> {
    let kv_iter = ParseIter {
        inner: Token::lex(input),
        input,
        expects_segment: true,
        is_broken: false,
    };

    let mut header = ParsedHeader::default();
    for kv in kv_iter {
        let (key, value) = kv?;

        match key {
            "t" => header.epoch = Some(value),
            "s" => header.submission_id = Some(value),
            "f" => header.form_id = Some(value),
            "v1" => header.signature = Some(value),
            _ => {}
        }
    }

    Ok(header)
}
