use crate::error::Result;
use crate::sink::{GraphSink, RelKind};
use std::collections::HashMap;
use tree_sitter::{Node, Tree};

struct ScopeFrame {
    /// Statement variable of the node that owns this scope
    owner: String,
    /// Name -> statement variable of the declaring node
    bindings: HashMap<String, String>,
}

impl ScopeFrame {
    fn new(owner: String) -> Self {
        Self {
            owner,
            bindings: HashMap::new(),
        }
    }
}

/// Walks a parsed file with an explicit scope stack and emits declaration
/// nodes, containment/declaration relationships, and resolved references
/// into a [`GraphSink`].
///
/// Bindings are recorded in visit order, so a reference only resolves to
/// declarations that precede it in the file.
pub struct ScopeWalker<'a, S: GraphSink> {
    sink: &'a mut S,
    source: &'a [u8],
    scopes: Vec<ScopeFrame>,
    next_var: usize,
}

impl<'a, S: GraphSink> ScopeWalker<'a, S> {
    /// Traverse `tree` and emit one file's worth of graph mutations
    pub fn run(
        sink: &'a mut S,
        tree: &Tree,
        source: &'a str,
        path: &str,
        session_id: &str,
    ) -> Result<()> {
        let mut walker = Self {
            sink,
            source: source.as_bytes(),
            scopes: Vec::new(),
            next_var: 0,
        };

        let file_var = walker.fresh_var();
        walker.sink.file(&file_var, path, session_id)?;
        walker.scopes.push(ScopeFrame::new(file_var));
        walker.visit(tree.root_node())
    }

    fn fresh_var(&mut self) -> String {
        let var = format!("n{}", self.next_var);
        self.next_var += 1;
        var
    }

    fn owner(&self) -> String {
        self.scopes
            .last()
            .map(|frame| frame.owner.clone())
            .unwrap_or_default()
    }

    fn bind(&mut self, name: &str, var: &str) {
        if let Some(frame) = self.scopes.last_mut() {
            frame.bindings.insert(name.to_string(), var.to_string());
        }
    }

    /// Resolve a name through the scope stack, innermost first
    fn resolve(&self, name: &str) -> Option<String> {
        self.scopes
            .iter()
            .rev()
            .find_map(|frame| frame.bindings.get(name).cloned())
    }

    fn text(&self, node: Node) -> Result<String> {
        Ok(node.utf8_text(self.source)?.to_string())
    }

    fn line(node: Node) -> usize {
        node.start_position().row + 1
    }

    fn visit(&mut self, node: Node) -> Result<()> {
        match node.kind() {
            "function_declaration" | "generator_function_declaration" => {
                self.visit_function(node, "Function", RelKind::Declares)
            }
            "method_definition" => self.visit_function(node, "Method", RelKind::Contains),
            "class_declaration" => self.visit_class(node),
            "variable_declarator" => self.visit_declarator(node),
            "statement_block" => self.visit_block(node),
            "call_expression" => self.visit_call(node),
            _ => self.visit_children(node),
        }
    }

    fn visit_children(&mut self, node: Node) -> Result<()> {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child)?;
        }
        Ok(())
    }

    fn visit_function(&mut self, node: Node, label: &str, link: RelKind) -> Result<()> {
        let Some(name_node) = node.child_by_field_name("name") else {
            return self.visit_children(node);
        };
        let name = self.text(name_node)?;

        let var = self.fresh_var();
        let owner = self.owner();
        self.sink.declaration(&var, label, &name, Self::line(node))?;
        self.sink.edge(&owner, &var, link)?;
        self.bind(&name, &var);

        self.scopes.push(ScopeFrame::new(var.clone()));

        if let Some(parameters) = node.child_by_field_name("parameters") {
            let mut cursor = parameters.walk();
            for parameter in parameters.children(&mut cursor) {
                if parameter.kind() == "identifier" {
                    let pname = self.text(parameter)?;
                    let pvar = self.fresh_var();
                    self.sink
                        .declaration(&pvar, "Variable", &pname, Self::line(parameter))?;
                    self.sink.edge(&var, &pvar, RelKind::Declares)?;
                    self.bind(&pname, &pvar);
                }
            }
        }

        if let Some(body) = node.child_by_field_name("body") {
            self.visit_children(body)?;
        }

        self.scopes.pop();
        Ok(())
    }

    fn visit_class(&mut self, node: Node) -> Result<()> {
        let Some(name_node) = node.child_by_field_name("name") else {
            return self.visit_children(node);
        };
        let name = self.text(name_node)?;

        let var = self.fresh_var();
        let owner = self.owner();
        self.sink
            .declaration(&var, "Class", &name, Self::line(node))?;
        self.sink.edge(&owner, &var, RelKind::Declares)?;
        self.bind(&name, &var);

        self.scopes.push(ScopeFrame::new(var));
        if let Some(body) = node.child_by_field_name("body") {
            self.visit_children(body)?;
        }
        self.scopes.pop();
        Ok(())
    }

    fn visit_declarator(&mut self, node: Node) -> Result<()> {
        if let Some(name_node) = node.child_by_field_name("name") {
            // Destructuring patterns are skipped; only plain identifiers bind.
            if name_node.kind() == "identifier" {
                let name = self.text(name_node)?;
                let var = self.fresh_var();
                let owner = self.owner();
                self.sink
                    .declaration(&var, "Variable", &name, Self::line(node))?;
                self.sink.edge(&owner, &var, RelKind::Declares)?;
                self.bind(&name, &var);
            }
        }

        if let Some(value) = node.child_by_field_name("value") {
            self.visit(value)?;
        }
        Ok(())
    }

    fn visit_block(&mut self, node: Node) -> Result<()> {
        // Lexical frame: same owner, own bindings for let/const.
        let frame = ScopeFrame::new(self.owner());
        self.scopes.push(frame);
        self.visit_children(node)?;
        self.scopes.pop();
        Ok(())
    }

    fn visit_call(&mut self, node: Node) -> Result<()> {
        if let Some(function) = node.child_by_field_name("function") {
            if function.kind() == "identifier" {
                let name = self.text(function)?;
                if let Some(declaration) = self.resolve(&name) {
                    let owner = self.owner();
                    self.sink.edge(&owner, &declaration, RelKind::Reads)?;
                }
            }
        }
        self.visit_children(node)
    }
}
