mod literal;

pub use literal::Literal;
pub use literal::Variable;
