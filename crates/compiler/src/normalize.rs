use model::query::filter::Filter;

/// Splices nested combinators into a parent with the same operator.
///
/// Children are normalized before their parent, so one pass reaches the
/// fixed point and the function is idempotent. Operand order is kept and a
/// combinator never drops below two operands.
pub fn normalize(filter: Filter) -> Filter {
    match filter {
        Filter::Comparison { .. } => filter,
        Filter::Logical { operator, operands } => {
            let mut flat = Vec::with_capacity(operands.len());

            for operand in operands {
                match normalize(operand) {
                    Filter::Logical {
                        operator: nested,
                        operands: inner,
                    } if nested == operator => flat.extend(inner),
                    other => flat.push(other),
                }
            }

            Filter::Logical {
                operator,
                operands: flat,
            }
        }
    }
}
