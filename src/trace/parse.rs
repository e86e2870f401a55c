//! Textual reference strings.
//!
//! Tokens are separated by whitespace or commas. A global reference is
//! `pid:page`; a per-process page list is bare page numbers.

use crate::common::{Error, PageId, ProcessId, Result};

fn tokens(input: &str) -> impl Iterator<Item = &str> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
}

fn number(token: &str, context: &str) -> Result<u32> {
    token
        .trim()
        .parse()
        .map_err(|_| Error::MalformedReference(context.to_string()))
}

/// Parse a global sequence such as `"1:1 1:2, 2:3"`.
///
/// # Errors
/// - `Error::MalformedReference` naming the first bad token
pub fn parse_sequence(input: &str) -> Result<Vec<(ProcessId, PageId)>> {
    tokens(input)
        .map(|token| -> Result<(ProcessId, PageId)> {
            let (pid, page) = token
                .split_once(':')
                .ok_or_else(|| Error::MalformedReference(token.to_string()))?;
            Ok((ProcessId(number(pid, token)?), PageId(number(page, token)?)))
        })
        .collect()
}

/// Parse a page list such as `"1,2,3,2"`.
///
/// # Errors
/// - `Error::MalformedReference` naming the first bad token
pub fn parse_pages(input: &str) -> Result<Vec<PageId>> {
    tokens(input)
        .map(|token| number(token, token).map(PageId))
        .collect()
}

/// Parse a process assignment such as `"2=1,4,1"`.
///
/// # Errors
/// - `Error::MalformedReference` if the `=` or any number is missing
pub fn parse_process(input: &str) -> Result<(ProcessId, Vec<PageId>)> {
    let (pid, pages) = input
        .split_once('=')
        .ok_or_else(|| Error::MalformedReference(input.to_string()))?;
    Ok((ProcessId(number(pid, input)?), parse_pages(pages)?))
}
