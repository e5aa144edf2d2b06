pub mod ast_nodes;
pub mod parse_json;
pub mod term_tree;

#[cfg(test)]
mod tests {
    mod parse_json_tests;
}
