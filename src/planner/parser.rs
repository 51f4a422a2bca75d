use sqlparser::{
    ast::{
        BinaryOperator, CharacterLength, ColumnOption, CreateTable, DataType as SqlDataType,
        Delete, Expr, FromTable, Insert, ObjectType, Query, SelectItem, SetExpr,
        Statement as SqlStatement, TableFactor, TableWithJoins, UnaryOperator,
        Value as SqlValue,
    },
    dialect::SQLiteDialect,
    parser::Parser,
};

use crate::{
    executor::predicate::{ComparisonOp, Condition, Predicate},
    planner::statement::{
        ColumnDefinition, CreateTableStatement, DeleteStatement, DropTableStatement,
        InsertStatement, Projection, SelectStatement, Statement,
    },
    types::{
        error::{DatabaseError, Result},
        value::{ColumnType, Value},
    },
};

/// Width used for TEXT and unsized VARCHAR columns.
const DEFAULT_TEXT_WIDTH: usize = 255;

pub struct SqlParser;

impl SqlParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_statement(&self, sql: &str) -> Result<Statement> {
        let dialect = SQLiteDialect {};
        let statements = Parser::parse_sql(&dialect, sql)?;
        if statements.len() != 1 {
            return Err(DatabaseError::UnsupportedStatement(
                "expected exactly one statement".to_string(),
            ));
        }
        self.to_statement(&statements[0])
    }

    fn to_statement(&self, statement: &SqlStatement) -> Result<Statement> {
        match statement {
            SqlStatement::CreateTable(create) => self.create_table(create),
            SqlStatement::Insert(insert) => self.insert(insert),
            SqlStatement::Query(query) => self.select(query),
            SqlStatement::Delete(delete) => self.delete(delete),
            SqlStatement::Drop {
                object_type: ObjectType::Table,
                if_exists,
                names,
                ..
            } => {
                if names.len() != 1 {
                    return Err(DatabaseError::UnsupportedStatement(
                        "DROP TABLE takes exactly one table".to_string(),
                    ));
                }
                Ok(Statement::DropTable(DropTableStatement {
                    table_name: names[0].to_string(),
                    if_exists: *if_exists,
                }))
            }
            SqlStatement::ShowTables { .. } => Ok(Statement::ShowTables),
            other => Err(DatabaseError::UnsupportedStatement(other.to_string())),
        }
    }

    fn create_table(&self, create: &CreateTable) -> Result<Statement> {
        let mut columns = Vec::with_capacity(create.columns.len());
        for column in &create.columns {
            let column_type = self.column_type(&column.data_type)?;
            let primary_key = column.options.iter().any(|definition| {
                matches!(
                    definition.option,
                    ColumnOption::Unique {
                        is_primary: true,
                        ..
                    }
                )
            });
            columns.push(ColumnDefinition {
                name: column.name.value.clone(),
                column_type,
                primary_key,
            });
        }
        Ok(Statement::CreateTable(CreateTableStatement {
            table_name: create.name.to_string(),
            columns,
        }))
    }

    fn column_type(&self, sql_type: &SqlDataType) -> Result<ColumnType> {
        match sql_type {
            SqlDataType::Int(_) | SqlDataType::Integer(_) => Ok(ColumnType::Int32),
            SqlDataType::Varchar(Some(CharacterLength::IntegerLength { length, .. }))
            | SqlDataType::Char(Some(CharacterLength::IntegerLength { length, .. })) => {
                Ok(ColumnType::FixedText(*length as usize))
            }
            SqlDataType::Varchar(None) | SqlDataType::Char(None) | SqlDataType::Text => {
                Ok(ColumnType::FixedText(DEFAULT_TEXT_WIDTH))
            }
            other => Err(DatabaseError::UnsupportedDataType(other.to_string())),
        }
    }

    fn insert(&self, insert: &Insert) -> Result<Statement> {
        if !insert.columns.is_empty() {
            return Err(DatabaseError::UnsupportedStatement(
                "INSERT with an explicit column list".to_string(),
            ));
        }
        let source = insert.source.as_ref().ok_or_else(|| {
            DatabaseError::UnsupportedStatement("INSERT without VALUES".to_string())
        })?;
        let SetExpr::Values(values) = source.body.as_ref() else {
            return Err(DatabaseError::UnsupportedStatement(
                "INSERT source must be a VALUES list".to_string(),
            ));
        };
        let mut rows = Vec::with_capacity(values.rows.len());
        for exprs in &values.rows {
            let row: Vec<Value> = exprs
                .iter()
                .map(|expr| self.literal(expr))
                .collect::<Result<_>>()?;
            rows.push(row);
        }
        Ok(Statement::Insert(InsertStatement {
            table_name: insert.table.to_string(),
            rows,
        }))
    }

    fn select(&self, query: &Query) -> Result<Statement> {
        let SetExpr::Select(select) = query.body.as_ref() else {
            return Err(DatabaseError::UnsupportedStatement(
                "only plain SELECT queries are supported".to_string(),
            ));
        };
        let table_name = self.single_table(&select.from)?;

        let projection = if select
            .projection
            .iter()
            .any(|item| matches!(item, SelectItem::Wildcard(_)))
        {
            Projection::All
        } else {
            let mut names = Vec::with_capacity(select.projection.len());
            for item in &select.projection {
                match item {
                    SelectItem::UnnamedExpr(Expr::Identifier(ident)) => {
                        names.push(ident.value.clone());
                    }
                    other => {
                        return Err(DatabaseError::UnsupportedExpression(other.to_string()));
                    }
                }
            }
            Projection::Columns(names)
        };

        let predicate = match &select.selection {
            Some(expr) => Some(self.predicate(expr)?),
            None => None,
        };

        Ok(Statement::Select(SelectStatement {
            table_name,
            projection,
            predicate,
        }))
    }

    fn delete(&self, delete: &Delete) -> Result<Statement> {
        let tables = match &delete.from {
            FromTable::WithFromKeyword(tables) | FromTable::WithoutKeyword(tables) => tables,
        };
        let table_name = self.single_table(tables)?;
        let predicate = match &delete.selection {
            Some(expr) => Some(self.predicate(expr)?),
            None => None,
        };
        Ok(Statement::Delete(DeleteStatement {
            table_name,
            predicate,
        }))
    }

    fn single_table(&self, from: &[TableWithJoins]) -> Result<String> {
        if from.len() != 1 || !from[0].joins.is_empty() {
            return Err(DatabaseError::UnsupportedStatement(
                "exactly one table without joins is required".to_string(),
            ));
        }
        match &from[0].relation {
            TableFactor::Table { name, .. } => Ok(name.to_string()),
            other => Err(DatabaseError::UnsupportedExpression(other.to_string())),
        }
    }

    /// WHERE clauses are conjunctions of `column op literal` comparisons.
    fn predicate(&self, expr: &Expr) -> Result<Predicate> {
        let mut conditions = Vec::new();
        self.collect_conditions(expr, &mut conditions)?;
        Ok(Predicate::from_conditions(conditions))
    }

    fn collect_conditions(&self, expr: &Expr, out: &mut Vec<Condition>) -> Result<()> {
        match expr {
            Expr::BinaryOp {
                left,
                op: BinaryOperator::And,
                right,
            } => {
                self.collect_conditions(left, out)?;
                self.collect_conditions(right, out)
            }
            Expr::BinaryOp { left, op, right } => {
                let Expr::Identifier(ident) = left.as_ref() else {
                    return Err(DatabaseError::UnsupportedExpression(left.to_string()));
                };
                out.push(Condition {
                    column: ident.value.clone(),
                    op: self.comparison_op(op)?,
                    value: self.literal(right)?,
                });
                Ok(())
            }
            Expr::Nested(inner) => self.collect_conditions(inner, out),
            other => Err(DatabaseError::UnsupportedExpression(other.to_string())),
        }
    }

    fn comparison_op(&self, op: &BinaryOperator) -> Result<ComparisonOp> {
        match op {
            BinaryOperator::Eq => Ok(ComparisonOp::Equal),
            BinaryOperator::NotEq => Ok(ComparisonOp::NotEqual),
            BinaryOperator::Lt => Ok(ComparisonOp::LessThan),
            BinaryOperator::LtEq => Ok(ComparisonOp::LessThanOrEqual),
            BinaryOperator::Gt => Ok(ComparisonOp::GreaterThan),
            BinaryOperator::GtEq => Ok(ComparisonOp::GreaterThanOrEqual),
            other => Err(DatabaseError::UnsupportedExpression(other.to_string())),
        }
    }

    fn literal(&self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Value(SqlValue::Number(text, _)) => self.integer(text, false),
            Expr::Value(SqlValue::SingleQuotedString(text))
            | Expr::Value(SqlValue::DoubleQuotedString(text)) => Ok(Value::Text(text.clone())),
            Expr::UnaryOp {
                op: UnaryOperator::Minus,
                expr,
            } => match expr.as_ref() {
                Expr::Value(SqlValue::Number(text, _)) => self.integer(text, true),
                other => Err(DatabaseError::UnsupportedExpression(other.to_string())),
            },
            other => Err(DatabaseError::UnsupportedExpression(other.to_string())),
        }
    }

    fn integer(&self, text: &str, negative: bool) -> Result<Value> {
        let parsed: i64 = text.parse().map_err(|_| DatabaseError::TypeMismatch {
            expected: "INT".to_string(),
            actual: text.to_string(),
        })?;
        let parsed = if negative { -parsed } else { parsed };
        i32::try_from(parsed)
            .map(Value::Integer)
            .map_err(|_| DatabaseError::InvalidData {
                details: format!("integer literal {} out of range", parsed),
            })
    }
}

impl Default for SqlParser {
    fn default() -> Self {
        Self::new()
    }
}
