use std::{error::Error, fmt::Display};

use crate::{
    ast::{build, AstNode, BuildError},
    postfix::{shunting_yard, TraceStep},
    preprocess::{desugar, expand_escapes, insert_concat, SugarError},
    token::{render, tokenize, Token},
};

/// Everything the pipeline produces for one well-formed expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Compilation {
    pub root: AstNode,
    pub preprocessed: Vec<Token>,
    pub postfix: Vec<Token>,
    pub trace: Vec<TraceStep>,
}

impl Compilation {
    pub fn preprocessed_string(&self) -> String {
        render(&self.preprocessed)
    }

    pub fn postfix_string(&self) -> String {
        render(&self.postfix)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum CompileError {
    Desugar(SugarError),
    Build(BuildError, String),
}

impl CompileError {
    /// The postfix string produced before the pipeline gave up; empty when
    /// the failure happened during preprocessing.
    pub fn partial_postfix(&self) -> &str {
        match self {
            Self::Desugar(_) => "",
            Self::Build(_, postfix) => postfix,
        }
    }
}

impl Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Desugar(err) => write!(f, "{}", err),
            Self::Build(err, _) => write!(f, "{}", err),
        }
    }
}

impl Error for CompileError {}

/// Runs the full pipeline on a raw single-line pattern: escape expansion,
/// desugaring, concatenation insertion, postfix conversion, tree building.
pub fn compile(pattern: &str) -> Result<Compilation, CompileError> {
    let expanded = expand_escapes(pattern);
    let tokens = tokenize(&expanded);
    let desugared = desugar(tokens).map_err(CompileError::Desugar)?;
    let preprocessed = insert_concat(&desugared);

    let mut trace: Vec<TraceStep> = Vec::new();
    let postfix = shunting_yard(&preprocessed, &mut trace);

    match build(&postfix) {
        Ok(root) => Ok(Compilation {
            root,
            preprocessed,
            postfix,
            trace,
        }),
        Err(err) => Err(CompileError::Build(err, render(&postfix))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Op;

    fn leaf(c: char) -> Box<AstNode> {
        Box::new(AstNode::Literal(c))
    }

    fn root_of(pattern: &str) -> AstNode {
        compile(pattern).unwrap().root
    }

    #[test]
    fn single_literal() {
        let compilation = compile("a").unwrap();
        assert_eq!(compilation.root, AstNode::Literal('a'));
        assert_eq!(compilation.postfix_string(), "a");
    }

    #[test]
    fn epsilon_is_a_literal() {
        assert_eq!(root_of("ε"), AstNode::Literal('ε'));
    }

    #[test]
    fn plus_means_one_then_zero_or_more() {
        assert_eq!(
            root_of("a+"),
            AstNode::Concat(leaf('a'), Box::new(AstNode::Star(leaf('a'))))
        );
    }

    #[test]
    fn question_means_one_or_epsilon() {
        assert_eq!(root_of("a?"), AstNode::Alternation(leaf('a'), leaf('ε')));
    }

    #[test]
    fn concat_binds_tighter_than_alternation() {
        assert_eq!(
            root_of("a|b.c"),
            AstNode::Alternation(leaf('a'), Box::new(AstNode::Concat(leaf('b'), leaf('c'))))
        );
    }

    #[test]
    fn concat_is_left_associative() {
        assert_eq!(
            root_of("a.b.c"),
            AstNode::Concat(
                Box::new(AstNode::Concat(leaf('a'), leaf('b'))),
                leaf('c')
            )
        );
    }

    #[test]
    fn star_binds_tighter_than_adjacent_concat() {
        assert_eq!(
            root_of("ab*"),
            AstNode::Concat(leaf('a'), Box::new(AstNode::Star(leaf('b'))))
        );
    }

    #[test]
    fn starred_group() {
        assert_eq!(
            root_of("(a|b)*"),
            AstNode::Star(Box::new(AstNode::Alternation(leaf('a'), leaf('b'))))
        );
    }

    #[test]
    fn escaped_parens_are_literals() {
        assert_eq!(
            root_of("\\(a\\)"),
            AstNode::Concat(
                Box::new(AstNode::Concat(leaf('('), leaf('a'))),
                leaf(')')
            )
        );
    }

    #[test]
    fn rendered_tree_compiles_to_the_same_tree() {
        for pattern in ["a", "(a|b)*", "ab*c", "a+", "x?y", "\\(a\\)", "0(1|0)*1"] {
            let first = root_of(pattern);
            let second = root_of(&first.to_string());
            assert_eq!(first, second, "round trip diverged for {}", pattern);
        }
    }

    #[test]
    fn lone_star_reports_insufficient_operands() {
        assert_eq!(
            compile("*"),
            Err(CompileError::Build(
                BuildError::InsufficientOperands(Op::Star, 0),
                "*".to_string()
            ))
        );
    }

    #[test]
    fn swapped_parens_take_the_leniency_path() {
        // ')' is dropped, '(' is flushed into the postfix sequence, and the
        // builder then starves
        let err = compile(")(").unwrap_err();
        assert_eq!(
            err,
            CompileError::Build(
                BuildError::InsufficientOperands(Op::Concat, 1),
                "(.".to_string()
            )
        );
        assert_eq!(err.partial_postfix(), "(.");
    }

    #[test]
    fn leading_sugar_aborts_before_any_postfix() {
        let err = compile("+a").unwrap_err();
        assert_eq!(
            err,
            CompileError::Desugar(SugarError::MissingOperand('+', 0))
        );
        assert_eq!(err.partial_postfix(), "");
    }

    #[test]
    fn expanded_brace_escape_is_discarded() {
        // '\{' expands to a bare '{', which no later stage accepts
        assert_eq!(
            compile("\\{"),
            Err(CompileError::Build(
                BuildError::MalformedExpression(0),
                String::new()
            ))
        );
    }

    #[test]
    fn trace_accompanies_every_success() {
        let compilation = compile("a|b").unwrap();
        assert_eq!(compilation.preprocessed_string(), "a|b");
        assert_eq!(compilation.postfix_string(), "ab|");
        assert_eq!(compilation.trace.len(), 4);
    }
}
