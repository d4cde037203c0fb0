use crate::{
    ast::{
        expr::{Expression, ExpressionKind},
        literal::Literal,
        operator::{BinaryOperator, LogicalOperator, UnaryOperator},
        span::Span,
    },
    error::SyntaxError,
    parser::{DirqParser, Rule},
};
use pest::{Parser, iterators::Pair};
use tracing::trace;

pub type BuildResult<T> = Result<T, SyntaxError>;

/// Parse query text into a typed expression tree
pub fn parse(input: &str) -> BuildResult<Expression> {
    let offsets = CharOffsets::new(input);
    let mut pairs = DirqParser::parse(Rule::program, input)
        .map_err(|err| offsets.rebase_error(SyntaxError::from_pest_error(err)))?;

    let program = pairs
        .next()
        .ok_or_else(|| SyntaxError::new("Empty input", 1, 1, 0))?;
    let parent = program.clone();
    let sequence = program
        .into_inner()
        .next()
        .ok_or_else(|| offsets.rebase_error(SyntaxError::at("Expected an expression", &parent)))?;

    let mut expression = build_sequence(sequence).map_err(|err| offsets.rebase_error(err))?;
    offsets.rebase(&mut expression);
    trace!(
        shape = expression.shape(),
        end = expression.span.end,
        "Built expression tree"
    );

    Ok(expression)
}

/// Maps pest byte positions to character positions for non-ASCII input.
struct CharOffsets {
    boundaries: Option<Vec<usize>>,
}

impl CharOffsets {
    fn new(input: &str) -> Self {
        let boundaries =
            (!input.is_ascii()).then(|| input.char_indices().map(|(byte, _)| byte).collect());
        Self { boundaries }
    }

    fn char_offset(&self, byte: usize) -> usize {
        match &self.boundaries {
            Some(boundaries) => boundaries.partition_point(|&b| b < byte),
            None => byte,
        }
    }

    fn rebase_error(&self, mut err: SyntaxError) -> SyntaxError {
        err.offset = self.char_offset(err.offset);
        err
    }

    fn rebase(&self, expression: &mut Expression) {
        if self.boundaries.is_none() {
            return;
        }

        expression.span.start = self.char_offset(expression.span.start);
        expression.span.end = self.char_offset(expression.span.end);

        match &mut expression.kind {
            ExpressionKind::Identifier(_) | ExpressionKind::Literal(_) => {}
            ExpressionKind::Unary { argument, .. } => self.rebase(argument),
            ExpressionKind::Binary { left, right, .. }
            | ExpressionKind::Logical { left, right, .. } => {
                self.rebase(left);
                self.rebase(right);
            }
            ExpressionKind::Call { callee, arguments } => {
                self.rebase(callee);
                arguments.iter_mut().for_each(|argument| self.rebase(argument));
            }
            ExpressionKind::Array(elements) | ExpressionKind::Sequence(elements) => {
                elements.iter_mut().for_each(|element| self.rebase(element));
            }
        }
    }
}

fn pair_to_span(pair: &Pair<Rule>) -> Span {
    let (line, col) = pair.line_col();
    let span = pair.as_span();
    Span::new(span.start(), span.end(), line, col)
}

fn unexpected(pair: &Pair<Rule>) -> SyntaxError {
    SyntaxError::at(
        format!("Unexpected rule in expression: {:?}", pair.as_rule()),
        pair,
    )
}

/// A comma list collapses to its only element; otherwise it becomes a sequence.
fn build_sequence(pair: Pair<Rule>) -> BuildResult<Expression> {
    let span = pair_to_span(&pair);
    let mut expressions = pair
        .into_inner()
        .map(build_expression)
        .collect::<BuildResult<Vec<_>>>()?;

    if expressions.len() == 1 {
        if let Some(expression) = expressions.pop() {
            return Ok(expression);
        }
    }

    Ok(Expression::new(ExpressionKind::Sequence(expressions), span))
}

fn build_expression(pair: Pair<Rule>) -> BuildResult<Expression> {
    match pair.as_rule() {
        Rule::expression => {
            let parent = pair.clone();
            let inner = pair
                .into_inner()
                .next()
                .ok_or_else(|| SyntaxError::at("Empty expression", &parent))?;
            build_expression(inner)
        }
        Rule::logical_or | Rule::logical_and | Rule::equality | Rule::relational => {
            build_chain(pair)
        }
        Rule::unary => build_unary(pair),
        Rule::postfix => build_postfix(pair),
        _ => Err(unexpected(&pair)),
    }
}

/// Folds `a OP b OP c` left to right into nested binary or logical nodes.
fn build_chain(pair: Pair<Rule>) -> BuildResult<Expression> {
    let parent = pair.clone();
    let mut inner = pair.into_inner();

    let first = inner
        .next()
        .ok_or_else(|| SyntaxError::at("Missing operand", &parent))?;
    let mut left = build_expression(first)?;

    while let Some(op_pair) = inner.next() {
        let right_pair = inner.next().ok_or_else(|| {
            SyntaxError::at(
                format!("Missing right operand for '{}'", op_pair.as_str()),
                &op_pair,
            )
        })?;
        let right = build_expression(right_pair)?;
        let span = left.span.to(&right.span);

        let kind = match op_pair.as_rule() {
            Rule::op_or => ExpressionKind::Logical {
                left: Box::new(left),
                operator: LogicalOperator::Or,
                right: Box::new(right),
            },
            Rule::op_and => ExpressionKind::Logical {
                left: Box::new(left),
                operator: LogicalOperator::And,
                right: Box::new(right),
            },
            Rule::equality_op | Rule::relational_op => {
                let operator = BinaryOperator::from_token(op_pair.as_str()).ok_or_else(|| {
                    SyntaxError::at(format!("Unknown operator: {}", op_pair.as_str()), &op_pair)
                })?;
                ExpressionKind::Binary {
                    left: Box::new(left),
                    operator,
                    right: Box::new(right),
                }
            }
            _ => return Err(unexpected(&op_pair)),
        };

        left = Expression::new(kind, span);
    }

    Ok(left)
}

fn build_unary(pair: Pair<Rule>) -> BuildResult<Expression> {
    let mut operators = Vec::new();
    let mut operand = None;

    for inner in pair.clone().into_inner() {
        match inner.as_rule() {
            Rule::unary_op => operators.push(inner),
            _ => operand = Some(build_expression(inner)?),
        }
    }

    let mut expression = operand.ok_or_else(|| SyntaxError::at("Missing operand", &pair))?;

    // Innermost operator is the one closest to the operand.
    for op_pair in operators.into_iter().rev() {
        let operator = UnaryOperator::from_token(op_pair.as_str()).ok_or_else(|| {
            SyntaxError::at(format!("Unknown operator: {}", op_pair.as_str()), &op_pair)
        })?;
        let span = pair_to_span(&op_pair).to(&expression.span);
        expression = Expression::new(
            ExpressionKind::Unary {
                operator,
                argument: Box::new(expression),
            },
            span,
        );
    }

    Ok(expression)
}

fn build_postfix(pair: Pair<Rule>) -> BuildResult<Expression> {
    let parent = pair.clone();
    let mut inner = pair.into_inner();

    let primary = inner
        .next()
        .ok_or_else(|| SyntaxError::at("Missing expression", &parent))?;
    let mut expression = build_primary(primary)?;

    for args in inner {
        let span = expression.span.to(&pair_to_span(&args));
        let arguments = args
            .into_inner()
            .map(build_expression)
            .collect::<BuildResult<Vec<_>>>()?;

        expression = Expression::new(
            ExpressionKind::Call {
                callee: Box::new(expression),
                arguments,
            },
            span,
        );
    }

    Ok(expression)
}

fn build_primary(pair: Pair<Rule>) -> BuildResult<Expression> {
    let span = pair_to_span(&pair);

    match pair.as_rule() {
        Rule::lit_null => Ok(Expression::literal(Literal::Null, span)),
        Rule::lit_boolean => Ok(Expression::literal(
            Literal::Boolean(pair.as_str() == "true"),
            span,
        )),
        Rule::lit_number => {
            let value = pair
                .as_str()
                .parse::<f64>()
                .map_err(|_| SyntaxError::at(format!("Invalid number: {}", pair.as_str()), &pair))?;
            Ok(Expression::literal(Literal::Number(value), span))
        }
        Rule::lit_string => Ok(Expression::literal(
            Literal::String(parse_string_literal(pair.as_str())),
            span,
        )),
        Rule::ident => Ok(Expression::identifier(pair.as_str(), span)),
        Rule::array_lit => {
            let elements = pair
                .into_inner()
                .map(build_expression)
                .collect::<BuildResult<Vec<_>>>()?;
            Ok(Expression::new(ExpressionKind::Array(elements), span))
        }
        Rule::group => {
            let parent = pair.clone();
            let sequence = pair
                .into_inner()
                .next()
                .ok_or_else(|| SyntaxError::at("Empty parentheses", &parent))?;
            build_sequence(sequence)
        }
        _ => Err(unexpected(&pair)),
    }
}

/// Strips the surrounding quotes and resolves backslash escapes.
fn parse_string_literal(raw: &str) -> String {
    let content = if raw.len() >= 2 {
        &raw[1..raw.len() - 1]
    } else {
        raw
    };

    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('b') => result.push('\u{8}'),
            Some('f') => result.push('\u{c}'),
            Some('v') => result.push('\u{b}'),
            Some('0') => result.push('\0'),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => {
                        result.push(decoded);
                        for _ in 0..4 {
                            chars.next();
                        }
                    }
                    _ => result.push('u'),
                }
            }
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }

    result
}
