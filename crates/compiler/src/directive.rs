use crate::{
    CompileError,
    fields::compile_field_list,
    filter::{CompiledWhere, compile_where},
    options::{CompileOptions, DuplicatePolicy},
    order::compile_order,
    paging::compile_count,
};
use dirq_syntax::ast::expr::{Expression, ExpressionKind};
use model::query::{descriptor::QueryDescriptor, filter::Filter, order::OrderEntry};
use std::{collections::HashSet, fmt};
use tracing::{debug, warn};

/// The six top-level operations of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    Select,
    Where,
    Order,
    Extend,
    Limit,
    Offset,
}

impl Directive {
    pub const ALL: [Directive; 6] = [
        Directive::Select,
        Directive::Where,
        Directive::Order,
        Directive::Extend,
        Directive::Limit,
        Directive::Offset,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Directive::Select => "select",
            Directive::Where => "where",
            Directive::Order => "order",
            Directive::Extend => "extend",
            Directive::Limit => "limit",
            Directive::Offset => "offset",
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One directive call found at the top level of a query.
#[derive(Debug)]
pub(crate) struct Invocation<'a> {
    pub directive: Directive,
    pub arguments: &'a [Expression],
    pub offset: usize,
}

/// What a single directive adds to the descriptor.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Contribution {
    Select(Vec<String>),
    Where {
        filter: Filter,
        fields: Vec<String>,
    },
    Order(Vec<OrderEntry>),
    Extend(Vec<String>),
    Limit(u64),
    Offset(u64),
}

impl Contribution {
    fn apply(self, descriptor: &mut QueryDescriptor) {
        match self {
            Contribution::Select(fields) => descriptor.select = Some(fields),
            Contribution::Where { filter, fields } => {
                descriptor.filter = Some(filter);
                descriptor.where_fields = Some(fields);
            }
            Contribution::Order(entries) => descriptor.order = Some(entries),
            Contribution::Extend(fields) => descriptor.extend = Some(fields),
            Contribution::Limit(limit) => descriptor.limit = Some(limit),
            Contribution::Offset(offset) => descriptor.offset = Some(offset),
        }
    }
}

/// Top-level calls of a query. The root must be a call or a sequence.
pub(crate) fn top_level_calls(root: &Expression) -> Result<&[Expression], CompileError> {
    match &root.kind {
        ExpressionKind::Call { .. } => Ok(std::slice::from_ref(root)),
        ExpressionKind::Sequence(items) => Ok(items.as_slice()),
        _ => Err(CompileError::MalformedQuery {
            offset: root.offset(),
        }),
    }
}

/// Resolves one call to a directive. The callee must be a bare directive name.
pub(crate) fn resolve_call(expr: &Expression) -> Result<Invocation<'_>, CompileError> {
    let ExpressionKind::Call { callee, arguments } = &expr.kind else {
        return Err(CompileError::MalformedQuery {
            offset: expr.offset(),
        });
    };

    let name = callee.as_identifier().ok_or(CompileError::MalformedQuery {
        offset: callee.offset(),
    })?;

    let directive = Directive::from_name(name).ok_or_else(|| CompileError::UnknownDirective {
        name: name.to_string(),
        offset: callee.offset(),
    })?;

    Ok(Invocation {
        directive,
        arguments,
        offset: expr.offset(),
    })
}

fn contribution(
    invocation: &Invocation<'_>,
    options: &CompileOptions,
) -> Result<Contribution, CompileError> {
    let arguments = invocation.arguments;

    Ok(match invocation.directive {
        Directive::Select => Contribution::Select(compile_field_list(Directive::Select, arguments)?),
        Directive::Extend => Contribution::Extend(compile_field_list(Directive::Extend, arguments)?),
        Directive::Where => {
            let CompiledWhere { filter, fields } = compile_where(arguments)?;
            Contribution::Where { filter, fields }
        }
        Directive::Order => Contribution::Order(compile_order(arguments)?),
        Directive::Limit => Contribution::Limit(compile_count(
            Directive::Limit,
            arguments,
            options.integers,
        )?),
        Directive::Offset => Contribution::Offset(compile_count(
            Directive::Offset,
            arguments,
            options.integers,
        )?),
    })
}

/// Compiles every directive of `root` and folds the results into a descriptor.
pub(crate) fn assemble(
    root: &Expression,
    options: &CompileOptions,
) -> Result<QueryDescriptor, CompileError> {
    let mut seen = HashSet::new();
    let mut descriptor = QueryDescriptor::default();

    for call in top_level_calls(root)? {
        let invocation = resolve_call(call)?;
        if !seen.insert(invocation.directive) {
            match options.duplicates {
                DuplicatePolicy::Reject => {
                    return Err(CompileError::DuplicateDirective {
                        name: invocation.directive.to_string(),
                        offset: invocation.offset,
                    });
                }
                DuplicatePolicy::Overwrite => warn!(
                    directive = %invocation.directive,
                    offset = invocation.offset,
                    "Directive repeated, later occurrence overwrites the earlier one"
                ),
            }
        }

        debug!(
            directive = %invocation.directive,
            arguments = invocation.arguments.len(),
            offset = invocation.offset,
            "Compiling directive"
        );
        contribution(&invocation, options)?.apply(&mut descriptor);
    }

    Ok(descriptor)
}
