use crate::{CompileError, directive, options::CompileOptions};
use dirq_syntax::{DirectiveParser, ExpressionParser, ast::expr::Expression};
use model::query::descriptor::QueryDescriptor;
use once_cell::unsync::OnceCell;
use tracing::debug;

/// Compiles one query string into a [`QueryDescriptor`].
///
/// Construction only checks that the query is not blank. Parsing and
/// compiling happen on the first call to [`QueryCompiler::descriptor`]; a
/// successful result is kept and returned on every later call. Failures are
/// not kept, but recompiling the same text fails the same way.
///
/// The memo is unsynchronized, so the compiler is not `Sync`.
#[derive(Debug)]
pub struct QueryCompiler<P: ExpressionParser = DirectiveParser> {
    query: String,
    parser: P,
    options: CompileOptions,
    descriptor: OnceCell<QueryDescriptor>,
}

impl QueryCompiler<DirectiveParser> {
    pub fn new(query: impl Into<String>) -> Result<Self, CompileError> {
        Self::with_parser(query, DirectiveParser)
    }
}

impl<P: ExpressionParser> QueryCompiler<P> {
    pub fn with_parser(query: impl Into<String>, parser: P) -> Result<Self, CompileError> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(CompileError::EmptyQuery);
        }

        Ok(QueryCompiler {
            query,
            parser,
            options: CompileOptions::default(),
            descriptor: OnceCell::new(),
        })
    }

    pub fn with_options(self, options: CompileOptions) -> Self {
        QueryCompiler {
            options,
            descriptor: OnceCell::new(),
            ..self
        }
    }

    /// Parses the query text without compiling it.
    pub fn expression(&self) -> Result<Expression, CompileError> {
        Ok(self.parser.parse_expression(&self.query)?)
    }

    pub fn descriptor(&self) -> Result<&QueryDescriptor, CompileError> {
        self.descriptor.get_or_try_init(|| {
            let expression = self.expression()?;
            compile_expression(&expression, &self.options)
        })
    }

    pub fn into_descriptor(self) -> Result<QueryDescriptor, CompileError> {
        let QueryCompiler {
            query,
            parser,
            options,
            descriptor,
        } = self;

        match descriptor.into_inner() {
            Some(descriptor) => Ok(descriptor),
            None => compile_expression(&parser.parse_expression(&query)?, &options),
        }
    }
}

/// Compiles a tree that was parsed elsewhere.
pub fn compile_expression(
    expression: &Expression,
    options: &CompileOptions,
) -> Result<QueryDescriptor, CompileError> {
    let descriptor = directive::assemble(expression, options)?;
    debug!(
        select = descriptor.select.is_some(),
        filter = descriptor.filter.is_some(),
        order = descriptor.order.is_some(),
        extend = descriptor.extend.is_some(),
        limit = ?descriptor.limit,
        offset = ?descriptor.offset,
        "Compiled query descriptor"
    );
    Ok(descriptor)
}

pub fn compile(query: &str) -> Result<QueryDescriptor, CompileError> {
    compile_with(query, CompileOptions::default())
}

pub fn compile_with(query: &str, options: CompileOptions) -> Result<QueryDescriptor, CompileError> {
    QueryCompiler::new(query)?
        .with_options(options)
        .into_descriptor()
}
