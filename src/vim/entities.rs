//
// Copyright 2020 VIM Format Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.
//

//! VIM entity tables: a nested BFAST of per-table nested BFASTs, each
//! holding either a fixed `properties` column or typed `<type>:<name>`
//! numeric/index/string columns.

use std::convert::TryInto;

use crate::bfast;

use super::VimError;

/// A single serializable property: the entity it belongs to, and the
/// string-pool indices of its name and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Property {
    pub entity_id: i32,
    pub name: i32,
    pub value: i32,
}

/// One entity table: a name plus its typed columns, each kept in the order
/// the columns appeared in the underlying buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityTable {
    pub name: String,
    pub properties: Vec<Property>,
    pub numeric_columns: Vec<(String, Vec<f64>)>,
    pub index_columns: Vec<(String, Vec<i32>)>,
    pub string_columns: Vec<(String, Vec<i32>)>,
}

impl EntityTable {
    /// Looks up a numeric column by name.
    pub fn numeric_column(&self, name: &str) -> Option<&[f64]> {
        find(&self.numeric_columns, name)
    }

    /// Looks up an index column by name.
    pub fn index_column(&self, name: &str) -> Option<&[i32]> {
        find(&self.index_columns, name)
    }

    /// Looks up a string column by name.
    pub fn string_column(&self, name: &str) -> Option<&[i32]> {
        find(&self.string_columns, name)
    }
}

fn find<'a, T>(columns: &'a [(String, Vec<T>)], name: &str) -> Option<&'a [T]> {
    columns.iter().find(|(n, _)| n == name).map(|(_, values)| values.as_slice())
}

const PROPERTY_RECORD_SIZE: usize = 12;

fn parse_properties(data: &[u8]) -> Option<Vec<Property>> {
    if data.len() % PROPERTY_RECORD_SIZE != 0 {
        return None;
    }
    let mut properties = Vec::with_capacity(data.len() / PROPERTY_RECORD_SIZE);
    for chunk in data.chunks_exact(PROPERTY_RECORD_SIZE) {
        let entity_id = i32::from_le_bytes(chunk[0..4].try_into().ok()?);
        let name = i32::from_le_bytes(chunk[4..8].try_into().ok()?);
        let value = i32::from_le_bytes(chunk[8..12].try_into().ok()?);
        properties.push(Property { entity_id, name, value });
    }
    Some(properties)
}

fn parse_f64_column(data: &[u8]) -> Option<Vec<f64>> {
    if data.len() % 8 != 0 {
        return None;
    }
    Some(data.chunks_exact(8).map(|c| f64::from_le_bytes(c.try_into().unwrap())).collect())
}

fn parse_i32_column(data: &[u8]) -> Option<Vec<i32>> {
    if data.len() % 4 != 0 {
        return None;
    }
    Some(data.chunks_exact(4).map(|c| i32::from_le_bytes(c.try_into().unwrap())).collect())
}

/// Decodes the top-level `entities` buffer into a list of tables in buffer
/// declaration order, each table's columns likewise kept in declaration
/// order.
pub fn parse_entities(data: &[u8]) -> Result<Vec<(String, EntityTable)>, VimError> {
    let outer = bfast::unpack(data).map_err(|_| VimError::EntityLoadingException)?;

    let mut tables = Vec::with_capacity(outer.len());
    for (table_name, table_data) in outer.buffers() {
        let inner = bfast::unpack(table_data).map_err(|_| VimError::EntityLoadingException)?;
        let mut table = EntityTable { name: table_name.to_string(), ..EntityTable::default() };

        for (column_name, column_data) in inner.buffers() {
            if column_name == "properties" {
                table.properties = parse_properties(column_data)
                    .ok_or(VimError::EntityLoadingException)?;
                continue;
            }

            let (kind, name) = match column_name.split_once(':') {
                Some(parts) => parts,
                None => return Err(VimError::EntityLoadingException),
            };

            match kind {
                "numeric" => {
                    let values =
                        parse_f64_column(column_data).ok_or(VimError::EntityLoadingException)?;
                    table.numeric_columns.push((name.to_string(), values));
                }
                "index" => {
                    let values =
                        parse_i32_column(column_data).ok_or(VimError::EntityLoadingException)?;
                    table.index_columns.push((name.to_string(), values));
                }
                "string" => {
                    let values =
                        parse_i32_column(column_data).ok_or(VimError::EntityLoadingException)?;
                    table.string_columns.push((name.to_string(), values));
                }
                _ => return Err(VimError::EntityLoadingException),
            }
        }

        tables.push((table.name.clone(), table));
    }

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property_bytes(entity_id: i32, name: i32, value: i32) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(PROPERTY_RECORD_SIZE);
        bytes.extend_from_slice(&entity_id.to_le_bytes());
        bytes.extend_from_slice(&name.to_le_bytes());
        bytes.extend_from_slice(&value.to_le_bytes());
        bytes
    }

    #[test]
    fn test_parse_entities_with_all_column_kinds() {
        let properties = property_bytes(0, 1, 2);
        let numeric: Vec<u8> = [1.5f64, 2.5].iter().flat_map(|f| f.to_le_bytes()).collect();
        let index: Vec<u8> = [7i32, 8].iter().flat_map(|i| i.to_le_bytes()).collect();
        let string: Vec<u8> = [3i32].iter().flat_map(|i| i.to_le_bytes()).collect();

        let table_buffers: Vec<(&str, &[u8])> = vec![
            ("properties", &properties),
            ("numeric:area", &numeric),
            ("index:level", &index),
            ("string:name", &string),
        ];
        let table_blob = bfast::pack(&table_buffers);

        let outer_buffers: Vec<(&str, &[u8])> = vec![("Wall", &table_blob)];
        let outer_blob = bfast::pack(&outer_buffers);

        let tables = parse_entities(&outer_blob).unwrap();
        let (name, wall) = tables.iter().find(|(n, _)| n == "Wall").unwrap();
        assert_eq!(name, "Wall");
        assert_eq!(wall.properties, vec![Property { entity_id: 0, name: 1, value: 2 }]);
        assert_eq!(wall.numeric_column("area").unwrap(), &[1.5, 2.5]);
        assert_eq!(wall.index_column("level").unwrap(), &[7, 8]);
        assert_eq!(wall.string_column("name").unwrap(), &[3]);
    }

    #[test]
    fn test_unknown_column_kind_is_loading_exception() {
        let table_buffers: Vec<(&str, &[u8])> = vec![("bogus:name", &[0u8; 4])];
        let table_blob = bfast::pack(&table_buffers);
        let outer_buffers: Vec<(&str, &[u8])> = vec![("Wall", &table_blob)];
        let outer_blob = bfast::pack(&outer_buffers);

        let err = parse_entities(&outer_blob).unwrap_err();
        assert_eq!(err, VimError::EntityLoadingException);
    }

    #[test]
    fn test_table_and_column_order_is_preserved() {
        let table_a = bfast::pack(&[("numeric:z", &0.0f64.to_le_bytes()[..])]);
        let table_b = bfast::pack(&[("numeric:a", &0.0f64.to_le_bytes()[..])]);
        let outer_buffers: Vec<(&str, &[u8])> = vec![("Zebra", &table_a), ("Apple", &table_b)];
        let outer_blob = bfast::pack(&outer_buffers);

        let tables = parse_entities(&outer_blob).unwrap();
        let names: Vec<&str> = tables.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Zebra", "Apple"]);
    }
}
