mod delim;
use delim::Comma;

mod predicate;
use predicate::Conjunction;

use crate::{
    Action, CompiledStatement, CrudConfig, FieldSpec, Operation, Param, ParamDescriptor,
    Restriction, StatementGroup, StatementKind, TableRef,
};

use crudkit_core::{
    schema::{Column, Table},
    Error, Result, SchemaProbe,
};
use heck::ToUpperCamelCase;
use indexmap::{IndexMap, IndexSet};
use std::{collections::HashMap, sync::Arc};

/// Upper bound on SEARCH optional filters; the variant count doubles with
/// each one.
const MAX_OPTIONAL_FILTERS: usize = 16;

/// A compiled action: the descriptor of its request/response fields and its
/// statements.
#[derive(Debug)]
pub struct CrudModel {
    descriptor: ParamDescriptor,
    group: Arc<StatementGroup>,
}

impl CrudModel {
    pub fn descriptor(&self) -> &ParamDescriptor {
        &self.descriptor
    }

    pub fn group(&self) -> &Arc<StatementGroup> {
        &self.group
    }

    /// Compiles `action` over `tables`, reading table metadata through
    /// `probe`.
    pub fn compile(
        probe: &dyn SchemaProbe,
        config: &CrudConfig,
        tables: &[TableRef],
        action: &Action,
    ) -> Result<Self> {
        let Some(last) = tables.last() else {
            return Err(Error::configuration(format!("{action}: no tables")));
        };

        let mut compiler = Compiler {
            config,
            action,
            op: action.op(),
            qualify: action.op().is_query() && tables.len() > 1,
            seen: vec![],
            statements: vec![],
            fields: vec![],
            unique: IndexSet::new(),
            filter: Conjunction::default(),
            filter_fields: HashMap::new(),
        };

        for (index, table) in tables.iter().enumerate() {
            let table = Table::probe(probe, &table.name)?;
            compiler
                .table(index, &table)
                .map_err(|err| err.context(crudkit_core::err!("{action} >> {}", table.name)))?;
            compiler.seen.push(table.name);
        }

        let name = last.name.to_upper_camel_case();
        let group = compiler
            .finish(tables, &name)
            .map_err(|err| err.context(crudkit_core::err!("{action} >> {name}")))?;

        Ok(Self {
            descriptor: ParamDescriptor::new(name, compiler.fields),
            group: Arc::new(group),
        })
    }
}

struct Compiler<'a> {
    config: &'a CrudConfig,
    action: &'a Action,
    op: Operation,

    /// Column references carry their table name
    qualify: bool,

    /// Tables processed so far
    seen: Vec<String>,

    /// Per-table statements of mutating operations
    statements: Vec<CompiledStatement>,

    fields: Vec<FieldSpec>,

    /// Columns that already have a descriptor field
    unique: IndexSet<String>,

    /// WHERE clause shared by all tables of a RETRIEVE or SEARCH
    filter: Conjunction,

    /// SEARCH column to field name
    filter_fields: HashMap<String, String>,
}

/// Statement fragments of one table of a mutating operation.
#[derive(Default)]
struct Fragments {
    /// INSERT column list or UPDATE assignments
    columns: Vec<String>,

    /// INSERT values
    values: Vec<String>,

    params: Vec<Param>,
    filter: Conjunction,
}

impl Compiler<'_> {
    fn table(&mut self, index: usize, table: &Table) -> Result<()> {
        let action = self.action;
        let op = self.op;

        if table.primary_key.is_empty()
            && matches!(op, Operation::Retrieve | Operation::Update | Operation::Delete)
        {
            return Err(Error::missing_primary_key(&table.name));
        }

        let isa = self.isa_keys(index, table);
        if op.is_query() {
            for (column, parent) in &isa {
                self.filter
                    .push(format!("{}.{column} = {parent}.{column}", table.name));
            }
        }

        let mut fragments = Fragments::default();
        let requested = match op {
            Operation::Update => self.assignments(table, &mut fragments),
            Operation::Search => self.search_terms(table, &isa),
            _ => IndexSet::new(),
        };

        for column in &table.columns {
            let name = &column.name;
            let pk = table.is_primary_key(name);
            let field = self.config.field_name(&table.name, name);
            let restriction = action.restriction_of(name);
            let required = self.is_required(column, pk);

            match op {
                Operation::Create => {
                    if action.has_arg(name) {
                        continue;
                    }

                    fragments.columns.push(name.clone());
                    match restriction.and_then(Restriction::literal) {
                        Some(literal) => fragments.values.push(literal.to_string()),
                        None => {
                            fragments.values.push("?".to_string());
                            fragments
                                .params
                                .push(Param::new(&field, column.ty, !required));
                        }
                    }
                }
                Operation::Retrieve => {
                    if !pk {
                        continue;
                    }
                    if index == 0 {
                        let target = self.qualified(table, name);
                        let param = Param::new(&field, column.ty, !required);
                        condition(&mut self.filter, &target, restriction, param);
                    }
                }
                Operation::Delete => {
                    if !pk {
                        continue;
                    }
                    let param = Param::new(&field, column.ty, !required);
                    condition(&mut fragments.filter, name, restriction, param);
                }
                Operation::Update => {
                    if pk {
                        let param = Param::new(&field, column.ty, !required);
                        condition(&mut fragments.filter, name, restriction, param);
                    } else if !requested.contains(name) {
                        continue;
                    }
                }
                Operation::Search => {
                    if !requested.contains(name) {
                        continue;
                    }
                    self.filter_fields.insert(name.clone(), field.clone());
                }
            }

            let literal = restriction.is_some_and(|r| !r.is_negative());
            if literal || isa.contains_key(name) || !self.unique.insert(name.clone()) {
                continue;
            }

            self.fields.push(FieldSpec {
                name: field,
                column: name.clone(),
                ty: column.ty,
                size: column.precision,
                required,
            });
        }

        if !op.is_query() {
            self.emit(table, fragments)?;
        }

        Ok(())
    }

    /// Foreign keys of `table` that are also its primary key columns and
    /// reference a table processed earlier; column to parent table.
    fn isa_keys(&self, index: usize, table: &Table) -> IndexMap<String, String> {
        let mut keys = IndexMap::new();
        if index == 0 {
            return keys;
        }

        for key in &table.imported_keys {
            if table.is_primary_key(&key.column)
                && self.seen.iter().any(|seen| *seen == key.referenced_table)
            {
                keys.entry(key.column.clone())
                    .or_insert_with(|| key.referenced_table.clone());
            }
        }

        keys
    }

    /// The UPDATE SET list: the requested columns, or every non-key column
    /// when the action names none. Returns the columns bound to parameters.
    fn assignments(&self, table: &Table, fragments: &mut Fragments) -> IndexSet<String> {
        let targets: Vec<&Column> = if self.action.args().is_empty() {
            table
                .columns
                .iter()
                .filter(|column| !table.is_primary_key(&column.name))
                .collect()
        } else {
            self.action
                .args()
                .iter()
                .filter(|arg| !table.is_primary_key(&arg.column))
                .filter_map(|arg| table.column(&arg.column))
                .collect()
        };

        let mut requested = IndexSet::new();
        for column in targets {
            let name = &column.name;

            if let Some(literal) = self
                .action
                .restriction_of(name)
                .and_then(Restriction::literal)
            {
                fragments.columns.push(format!("{name} = {literal}"));
                continue;
            }

            let required = self.action.is_required(name);
            fragments.columns.push(if required {
                format!("{name} = ?")
            } else {
                format!("{name} = COALESCE(?, {name})")
            });
            fragments.params.push(Param::new(
                self.config.field_name(&table.name, name),
                column.ty,
                !required,
            ));
            requested.insert(name.clone());
        }

        requested
    }

    /// Adds the SEARCH predicates of `table`. Returns the columns bound to
    /// parameters.
    fn search_terms(&mut self, table: &Table, isa: &IndexMap<String, String>) -> IndexSet<String> {
        let action = self.action;
        let mut requested = IndexSet::new();

        for arg in action.args() {
            let name = &arg.column;
            if isa.contains_key(name) {
                continue;
            }
            let Some(column) = table.column(name) else {
                continue;
            };

            let target = self.qualified(table, name);
            let restriction = action.restriction_of(name);

            if let Some(Restriction::Literal(literal)) = restriction {
                self.filter.push(format!("{target} = {literal}"));
                continue;
            }

            if let Some(Restriction::Not(literal)) = restriction {
                self.filter.push(format!("{target} <> {literal}"));
            }

            let sql = format!("{target} {} ?", arg.cmp.as_sql());
            let param = Param::new(
                self.config.field_name(&table.name, name),
                column.ty,
                !arg.required,
            );

            if arg.required {
                self.filter.push_param(sql, param);
            } else {
                self.filter.push_filter(name, sql, param);
            }
            requested.insert(name.clone());
        }

        requested
    }

    /// A field is required when the action marks it so, when it is a key of
    /// a RETRIEVE, UPDATE or DELETE, or when its column is NOT NULL outside
    /// of SEARCH and of UPDATE assignments.
    fn is_required(&self, column: &Column, pk: bool) -> bool {
        let op = self.op;

        self.action.is_required(&column.name)
            || (pk && matches!(op, Operation::Retrieve | Operation::Update | Operation::Delete))
            || (!column.nullable && (op != Operation::Update || pk) && op != Operation::Search)
    }

    fn qualified(&self, table: &Table, column: &str) -> String {
        if self.qualify {
            format!("{}.{column}", table.name)
        } else {
            column.to_string()
        }
    }

    fn emit(&mut self, table: &Table, fragments: Fragments) -> Result<()> {
        let Fragments {
            columns,
            values,
            mut params,
            filter,
        } = fragments;

        let sql = match self.op {
            Operation::Create => {
                if columns.is_empty() {
                    return Err(Error::configuration(format!(
                        "no columns to insert into {}",
                        table.name
                    )));
                }
                format!(
                    "INSERT INTO {}({}) VALUES({})",
                    table.name,
                    Comma(&columns),
                    Comma(&values)
                )
            }
            Operation::Update => {
                // A table without assignments takes no part in the update
                if columns.is_empty() {
                    return Ok(());
                }
                let (clause, filter_params) = filter.render_all();
                params.extend(filter_params);
                format!("UPDATE {} SET {} WHERE {clause}", table.name, Comma(&columns))
            }
            Operation::Delete => {
                let (clause, filter_params) = filter.render_all();
                params.extend(filter_params);
                format!("DELETE FROM {} WHERE {clause}", table.name)
            }
            Operation::Retrieve | Operation::Search => return Ok(()),
        };

        let statement = CompiledStatement::new(params, sql)?.with_tag(table.name.to_upper_camel_case());
        log::debug!("compiled {}; statement={statement}", self.op);
        self.statements.push(statement);
        Ok(())
    }

    fn finish(&mut self, tables: &[TableRef], name: &str) -> Result<StatementGroup> {
        if !self.op.is_query() {
            let mut statements = std::mem::take(&mut self.statements);
            // Sub-tables reference their parent rows
            if self.op == Operation::Delete {
                statements.reverse();
            }
            return Ok(StatementGroup::new(StatementKind::Update, statements));
        }

        let names: Vec<&str> = tables.iter().map(|table| table.name.as_str()).collect();
        let dominant: Vec<String> = tables
            .iter()
            .filter(|table| table.dominant)
            .map(|table| format!("{}.*", table.name))
            .collect();
        let select = if dominant.is_empty() {
            format!("SELECT * FROM {}", Comma(&names))
        } else {
            format!("SELECT {} FROM {}", Comma(&dominant), Comma(&names))
        };

        if self.op == Operation::Retrieve {
            let (clause, params) = self.filter.render_all();
            let statement = self.select(&select, clause, params, name)?;
            return Ok(StatementGroup::query(statement));
        }

        let optionals = self.action.optionals();
        if optionals.len() > MAX_OPTIONAL_FILTERS {
            return Err(Error::configuration(format!(
                "{} optional filters exceed the limit of {MAX_OPTIONAL_FILTERS}",
                optionals.len()
            )));
        }

        let mut fields = Vec::with_capacity(optionals.len());
        for column in optionals {
            match self.filter_fields.get(column) {
                Some(field) if self.filter.has_filter(column) => fields.push(field.clone()),
                _ => {
                    return Err(Error::configuration(format!(
                        "column {column} not in relevant tables"
                    )))
                }
            }
        }

        let mut variants = Vec::with_capacity(1 << optionals.len());
        for mask in 0..1usize << optionals.len() {
            let keep = |column: &str| {
                optionals
                    .iter()
                    .position(|optional| optional == column)
                    .is_some_and(|bit| mask & (1 << bit) != 0)
            };
            let (clause, params) = self.filter.render(keep);
            variants.push(self.select(&select, clause, params, name)?);
        }

        StatementGroup::variants(variants, fields)
    }

    fn select(
        &self,
        select: &str,
        clause: String,
        params: Vec<Param>,
        name: &str,
    ) -> Result<CompiledStatement> {
        let sql = if clause.is_empty() {
            select.to_string()
        } else {
            format!("{select} WHERE {clause}")
        };

        let statement = CompiledStatement::new(params, sql)?.with_tag(name);
        log::debug!("compiled {}; statement={statement}", self.op);
        Ok(statement)
    }
}

/// Adds the key condition of `target` to `filter`. A negative restriction
/// keeps the bound comparison and adds the exclusion.
fn condition(
    filter: &mut Conjunction,
    target: &str,
    restriction: Option<&Restriction>,
    param: Param,
) {
    match restriction {
        Some(Restriction::Literal(literal)) => filter.push(format!("{target} = {literal}")),
        Some(Restriction::Not(literal)) => {
            filter.push_param(format!("{target} = ?"), param);
            filter.push(format!("{target} <> {literal}"));
        }
        None => filter.push_param(format!("{target} = ?"), param),
    }
}
