use crate::Connection;

use crudkit_core::{
    schema::{Column, ImportedKey},
    Error, Result, SchemaProbe, SqlType,
};

/// Catalog metadata read through SQLite's table-valued pragma functions.
impl SchemaProbe for Connection {
    fn columns_of(&self, table: &str) -> Result<Vec<Column>> {
        let mut stmt = self
            .connection
            .prepare("SELECT name, type, \"notnull\" FROM pragma_table_info(?1) ORDER BY cid")
            .map_err(Error::driver)?;

        let columns = stmt
            .query_map([table], |row| {
                let name: String = row.get(0)?;
                let decl: String = row.get(1)?;
                let not_null: bool = row.get(2)?;
                Ok((name, decl, not_null))
            })
            .map_err(Error::driver)?
            .map(|row| {
                let (name, decl, not_null) = row.map_err(Error::driver)?;
                let (ty, precision) = SqlType::from_decl(&decl);
                let column = Column::new(name, ty).precision(precision);
                Ok(if not_null { column.not_null() } else { column })
            })
            .collect::<Result<Vec<_>>>()?;

        if columns.is_empty() {
            return Err(Error::configuration(format!("table {table} does not exist")));
        }

        log::trace!("read columns; table={table} columns={}", columns.len());
        Ok(columns)
    }

    fn primary_keys_of(&self, table: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .connection
            .prepare("SELECT name FROM pragma_table_info(?1) WHERE pk > 0 ORDER BY pk")
            .map_err(Error::driver)?;

        let keys = stmt
            .query_map([table], |row| row.get(0))
            .map_err(Error::driver)?
            .collect::<rusqlite::Result<Vec<String>>>()
            .map_err(Error::driver)?;

        Ok(keys)
    }

    fn imported_keys_of(&self, table: &str) -> Result<Vec<ImportedKey>> {
        let mut stmt = self
            .connection
            .prepare("SELECT \"from\", \"table\" FROM pragma_foreign_key_list(?1) ORDER BY id, seq")
            .map_err(Error::driver)?;

        let keys = stmt
            .query_map([table], |row| {
                let column: String = row.get(0)?;
                let referenced: String = row.get(1)?;
                Ok(ImportedKey::new(column, referenced))
            })
            .map_err(Error::driver)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::driver)?;

        Ok(keys)
    }
}
