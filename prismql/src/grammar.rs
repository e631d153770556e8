use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "prismql.pest"]
pub struct PrismQlParser;
