use std::{error::Error, fmt::Display};

use colored::Colorize;

use crate::token::{Op, Token};

/// Expands the fixed escape sequences `\n`, `\t`, `\{`, `\}` and `\\`.
/// Escapes aimed at later stages (`\*`, `\(`, ...) pass through untouched.
pub fn expand_escapes(input: &str) -> String {
    // sequential whole-string passes; `\\` must come last so an expanded
    // `\t` or `\n` is never unescaped a second time
    input
        .replace("\\n", "\n")
        .replace("\\t", "\t")
        .replace("\\{", "{")
        .replace("\\}", "}")
        .replace("\\\\", "\\")
}

#[derive(Debug, PartialEq, Eq)]
pub enum SugarError {
    MissingOperand(char, usize),
}

impl Display for SugarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingOperand(sugar, position) => write!(
                f,
                "{} quantifier '{}' at token {} has nothing to repeat",
                "syntax error:".red().bold(),
                sugar,
                position
            ),
        }
    }
}

impl Error for SugarError {}

/// Rewrites the sugar operators into the base alphabet: `G+` becomes
/// `(G).(G)*` and `G?` becomes `(G|ε)`.
pub fn desugar(tokens: Vec<Token>) -> Result<Vec<Token>, SugarError> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());

    for (position, token) in tokens.into_iter().enumerate() {
        match token {
            Token::Plus | Token::Question => {
                if output.is_empty() {
                    return Err(SugarError::MissingOperand(token.symbol(), position));
                }
                let group = take_operand_group(&mut output);
                if token == Token::Plus {
                    output.push(Token::OpenParen);
                    output.extend(group.iter().copied());
                    output.push(Token::CloseParen);
                    output.push(Token::Operator(Op::Concat));
                    output.push(Token::OpenParen);
                    output.extend(group);
                    output.push(Token::CloseParen);
                    output.push(Token::Operator(Op::Star));
                } else {
                    output.push(Token::OpenParen);
                    output.extend(group);
                    output.push(Token::Operator(Op::Alternation));
                    output.push(Token::Literal('ε'));
                    output.push(Token::CloseParen);
                }
            }
            token => output.push(token),
        }
    }

    Ok(output)
}

// Splits off the operand the sugar operator applies to: the whole bracketed
// group when the emitted buffer ends in ')', otherwise the single preceding
// token. The backward scan is a plain bracket-depth counter; with no matching
// '(' the group falls back to the entire buffer and downstream stages report
// the malformation.
fn take_operand_group(output: &mut Vec<Token>) -> Vec<Token> {
    if output.last() != Some(&Token::CloseParen) {
        return match output.pop() {
            Some(token) => vec![token],
            None => Vec::new(),
        };
    }

    let mut depth = 0i32;
    let mut start = 0;
    for (index, token) in output.iter().enumerate().rev() {
        match token {
            Token::CloseParen => depth += 1,
            Token::OpenParen => depth -= 1,
            _ => {}
        }
        if depth == 0 {
            start = index;
            break;
        }
    }
    output.split_off(start)
}

/// Inserts the explicit concatenation operator between every pair of
/// adjacent fragments. Escaped units take part as whole literals on both
/// sides of the juxtaposition.
pub fn insert_concat(tokens: &[Token]) -> Vec<Token> {
    let mut result: Vec<Token> = Vec::with_capacity(tokens.len() * 2);
    for (index, token) in tokens.iter().enumerate() {
        result.push(*token);
        if let Some(next) = tokens.get(index + 1) {
            if token.ends_fragment() && next.begins_fragment() {
                result.push(Token::Operator(Op::Concat));
            }
        }
    }
    result
}
