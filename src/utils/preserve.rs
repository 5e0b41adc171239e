//! Reference-preserving JSON for reservation graphs.
//!
//! Every object and array written gets a `"$id"`; arrays are wrapped as
//! `{"$id": .., "$values": [..]}`. An entity that was already written is
//! emitted as `{"$ref": "<its $id>"}` instead of being encoded again, which
//! keeps Reservation -> Car -> Reservation cycles finite. Ids are decimal
//! strings counted from "1" in document order.
//!
//! Decoding resolves `$ref`s against `$id`s found anywhere in the document
//! and rebuilds the [`ReservationGraph`].

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{Car, Reservation, ReservationGraph, UserResponse};
use crate::errors::{AppError, AppResult};

pub const ID_KEY: &str = "$id";
pub const REF_KEY: &str = "$ref";
pub const VALUES_KEY: &str = "$values";

const CAR_KEY: &str = "car";
const USER_KEY: &str = "user";
const RESERVATIONS_KEY: &str = "reservations";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum NodeKey {
    Reservation(i32),
    Car(i32),
    User(i32),
}

/// Encode a graph as a `serde_json::Value`.
pub fn to_value(graph: &ReservationGraph) -> AppResult<Value> {
    let mut encoder = Encoder::new(graph);
    let roots: Vec<&Reservation> = graph.reservations().iter().collect();
    encoder.collection(roots)
}

/// Encode a graph as indented JSON text.
pub fn to_string_pretty(graph: &ReservationGraph) -> AppResult<String> {
    let value = to_value(graph)?;
    serde_json::to_string_pretty(&value)
        .map_err(|e| AppError::internal(format!("Failed to write reservation graph: {}", e)))
}

/// Rebuild a graph from its reference-preserving encoding.
pub fn from_value(value: &Value) -> AppResult<ReservationGraph> {
    let mut definitions = HashMap::new();
    collect_definitions(value, &mut definitions)?;

    let mut decoder = Decoder::new(definitions);
    for item in decoder.values(value)? {
        let id = decoder.reservation(item)?;
        decoder.roots.push(id);
    }
    Ok(decoder.finish())
}

/// Parse JSON text and rebuild the graph.
pub fn from_str(json: &str) -> AppResult<ReservationGraph> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| AppError::bad_request(format!("malformed JSON: {}", e)))?;
    from_value(&value)
}

struct Encoder<'g> {
    graph: &'g ReservationGraph,
    last_id: u32,
    written: HashMap<NodeKey, String>,
}

impl<'g> Encoder<'g> {
    fn new(graph: &'g ReservationGraph) -> Self {
        Self {
            graph,
            last_id: 0,
            written: HashMap::new(),
        }
    }

    fn next_id(&mut self) -> String {
        self.last_id += 1;
        self.last_id.to_string()
    }

    fn reference(&self, key: NodeKey) -> Option<Value> {
        self.written.get(&key).map(|id| {
            let mut object = Map::new();
            object.insert(REF_KEY.to_string(), Value::String(id.clone()));
            Value::Object(object)
        })
    }

    /// Start an object for `record`, registering it under `key`.
    fn open<T: Serialize>(&mut self, key: NodeKey, record: &T) -> AppResult<Map<String, Value>> {
        let id = self.next_id();
        self.written.insert(key, id.clone());

        let fields = match serde_json::to_value(record) {
            Ok(Value::Object(fields)) => fields,
            Ok(_) => return Err(AppError::internal("graph node did not serialize to an object")),
            Err(e) => return Err(AppError::internal(format!("Failed to serialize graph node: {}", e))),
        };

        let mut object = Map::new();
        object.insert(ID_KEY.to_string(), Value::String(id));
        object.extend(fields);
        Ok(object)
    }

    /// The array id is taken before any element is written.
    fn collection(&mut self, items: Vec<&'g Reservation>) -> AppResult<Value> {
        let id = self.next_id();
        let values = items
            .into_iter()
            .map(|reservation| self.reservation(reservation))
            .collect::<AppResult<Vec<_>>>()?;

        let mut object = Map::new();
        object.insert(ID_KEY.to_string(), Value::String(id));
        object.insert(VALUES_KEY.to_string(), Value::Array(values));
        Ok(Value::Object(object))
    }

    fn reservation(&mut self, reservation: &'g Reservation) -> AppResult<Value> {
        let key = NodeKey::Reservation(reservation.id);
        if let Some(reference) = self.reference(key) {
            return Ok(reference);
        }

        let mut object = self.open(key, reservation)?;
        let graph = self.graph;

        let car = match graph.car(reservation.car_id) {
            Some(car) => self.car(car)?,
            None => Value::Null,
        };
        object.insert(CAR_KEY.to_string(), car);

        let user = match graph.user(reservation.user_id) {
            Some(user) => self.user(user)?,
            None => Value::Null,
        };
        object.insert(USER_KEY.to_string(), user);

        Ok(Value::Object(object))
    }

    fn car(&mut self, car: &'g Car) -> AppResult<Value> {
        let key = NodeKey::Car(car.id);
        if let Some(reference) = self.reference(key) {
            return Ok(reference);
        }

        let mut object = self.open(key, car)?;
        let graph = self.graph;
        let reservations = graph.car_reservations(car.id).collect();
        object.insert(RESERVATIONS_KEY.to_string(), self.collection(reservations)?);
        Ok(Value::Object(object))
    }

    fn user(&mut self, user: &'g UserResponse) -> AppResult<Value> {
        let key = NodeKey::User(user.id);
        if let Some(reference) = self.reference(key) {
            return Ok(reference);
        }

        let mut object = self.open(key, user)?;
        let graph = self.graph;
        let reservations = graph.user_reservations(user.id).collect();
        object.insert(RESERVATIONS_KEY.to_string(), self.collection(reservations)?);
        Ok(Value::Object(object))
    }
}

fn collect_definitions<'v>(
    value: &'v Value,
    definitions: &mut HashMap<&'v str, &'v Value>,
) -> AppResult<()> {
    match value {
        Value::Object(map) => {
            if let Some(id) = map.get(ID_KEY) {
                let id = id
                    .as_str()
                    .ok_or_else(|| AppError::bad_request("\"$id\" must be a string"))?;
                if definitions.insert(id, value).is_some() {
                    return Err(AppError::bad_request(format!("duplicate \"$id\" {}", id)));
                }
            }
            for child in map.values() {
                collect_definitions(child, definitions)?;
            }
        }
        Value::Array(items) => {
            for child in items {
                collect_definitions(child, definitions)?;
            }
        }
        _ => {}
    }
    Ok(())
}

struct Decoder<'v> {
    definitions: HashMap<&'v str, &'v Value>,
    visited: HashSet<&'v str>,
    roots: Vec<i32>,
    reservations: BTreeMap<i32, Reservation>,
    cars: Vec<Car>,
    users: Vec<UserResponse>,
}

impl<'v> Decoder<'v> {
    fn new(definitions: HashMap<&'v str, &'v Value>) -> Self {
        Self {
            definitions,
            visited: HashSet::new(),
            roots: Vec::new(),
            reservations: BTreeMap::new(),
            cars: Vec::new(),
            users: Vec::new(),
        }
    }

    /// Follow a `$ref` to its definition; other values resolve to themselves.
    fn resolve(&self, value: &'v Value) -> AppResult<&'v Value> {
        let Some(target) = value.as_object().and_then(|map| map.get(REF_KEY)) else {
            return Ok(value);
        };
        let id = target
            .as_str()
            .ok_or_else(|| AppError::bad_request("\"$ref\" must be a string"))?;
        self.definitions
            .get(id)
            .copied()
            .ok_or_else(|| AppError::bad_request(format!("unresolved reference \"{}\"", id)))
    }

    /// Nodes without an `$id` cannot be referenced, so they are always new.
    fn first_visit(&mut self, node: &'v Value) -> bool {
        match node.get(ID_KEY).and_then(Value::as_str) {
            Some(id) => self.visited.insert(id),
            None => true,
        }
    }

    fn values(&self, value: &'v Value) -> AppResult<&'v Vec<Value>> {
        match self.resolve(value)? {
            Value::Array(items) => Ok(items),
            Value::Object(map) => map
                .get(VALUES_KEY)
                .and_then(Value::as_array)
                .ok_or_else(|| AppError::bad_request("expected a \"$values\" array")),
            _ => Err(AppError::bad_request("expected an array of reservations")),
        }
    }

    fn navigation(node: &'v Value, key: &str) -> Option<&'v Value> {
        node.get(key).filter(|value| !value.is_null())
    }

    fn reservation(&mut self, value: &'v Value) -> AppResult<i32> {
        let node = self.resolve(value)?;
        let reservation: Reservation = parse_node(node, "reservation")?;
        let id = reservation.id;
        if !self.first_visit(node) {
            return Ok(id);
        }
        self.reservations.entry(id).or_insert(reservation);

        if let Some(car) = Self::navigation(node, CAR_KEY) {
            self.car(car)?;
        }
        if let Some(user) = Self::navigation(node, USER_KEY) {
            self.user(user)?;
        }
        Ok(id)
    }

    fn car(&mut self, value: &'v Value) -> AppResult<()> {
        let node = self.resolve(value)?;
        if !self.first_visit(node) {
            return Ok(());
        }
        self.cars.push(parse_node(node, "car")?);
        self.back_references(node)
    }

    fn user(&mut self, value: &'v Value) -> AppResult<()> {
        let node = self.resolve(value)?;
        if !self.first_visit(node) {
            return Ok(());
        }
        self.users.push(parse_node(node, "user")?);
        self.back_references(node)
    }

    fn back_references(&mut self, node: &'v Value) -> AppResult<()> {
        if let Some(collection) = Self::navigation(node, RESERVATIONS_KEY) {
            for item in self.values(collection)? {
                self.reservation(item)?;
            }
        }
        Ok(())
    }

    /// Roots keep document order; reservations only reachable through a
    /// navigation follow them by id.
    fn finish(mut self) -> ReservationGraph {
        let mut ordered = Vec::with_capacity(self.reservations.len());
        for id in &self.roots {
            if let Some(reservation) = self.reservations.remove(id) {
                ordered.push(reservation);
            }
        }
        ordered.extend(self.reservations.into_values());

        let mut graph = ReservationGraph::new(ordered);
        for car in self.cars {
            graph.insert_car(car);
        }
        for user in self.users {
            graph.insert_user(user);
        }
        graph
    }
}

/// Unknown keys (`$id`, navigations) are ignored by the record types.
fn parse_node<'v, T: Deserialize<'v>>(node: &'v Value, kind: &str) -> AppResult<T> {
    T::deserialize(node).map_err(|e| AppError::bad_request(format!("invalid {}: {}", kind, e)))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use serde_json::json;

    use super::*;
    use crate::domain::{ReservationStatus, UserRole};

    fn reservation(id: i32, car_id: i32, user_id: i32) -> Reservation {
        Reservation {
            id,
            user_id,
            car_id,
            pickup_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            dropoff_date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            total_price: 99.0,
            status: ReservationStatus::Confirmed,
            created_at: Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    fn car(id: i32) -> Car {
        Car {
            id,
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2022,
            daily_rate: 49.5,
            location: None,
            available: true,
        }
    }

    fn user(id: i32) -> UserResponse {
        UserResponse {
            id,
            user_name: format!("user{}", id),
            email: format!("user{}@example.com", id),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            phone_number: None,
            role: UserRole::User,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn car_graph() -> ReservationGraph {
        ReservationGraph::new(vec![reservation(1, 7, 3), reservation(2, 7, 4)]).with_car(car(7))
    }

    #[test]
    fn test_shape_matches_reference_preserving_layout() {
        let value = to_value(&car_graph()).unwrap();

        assert_eq!(value["$id"], "1");
        let roots = value["$values"].as_array().unwrap();
        assert_eq!(roots.len(), 2);

        let first = &roots[0];
        assert_eq!(first["$id"], "2");
        assert_eq!(first["carId"], 7);
        assert_eq!(first["user"], Value::Null);

        let car = &first["car"];
        assert_eq!(car["$id"], "3");
        assert_eq!(car["reservations"]["$id"], "4");

        let back = car["reservations"]["$values"].as_array().unwrap();
        assert_eq!(back[0], json!({ "$ref": "2" }));
        assert_eq!(back[1]["$id"], "5");
        assert_eq!(back[1]["car"], json!({ "$ref": "3" }));

        assert_eq!(roots[1], json!({ "$ref": "5" }));
    }

    #[test]
    fn test_each_entity_written_once() {
        let text = to_string_pretty(&car_graph()).unwrap();
        assert_eq!(text.matches("\"make\"").count(), 1);
        assert_eq!(text.matches("\"pickupDate\"").count(), 2);
    }

    #[test]
    fn test_round_trip_restores_graph() {
        let graph = ReservationGraph::new(vec![
            reservation(1, 7, 3),
            reservation(2, 8, 3),
            reservation(3, 7, 3),
        ])
        .with_car(car(7))
        .with_car(car(8))
        .with_user(user(3));

        let text = to_string_pretty(&graph).unwrap();
        let decoded = from_str(&text).unwrap();
        assert_eq!(decoded, graph);
    }

    #[test]
    fn test_identity_recoverable_from_references() {
        let value = to_value(&car_graph()).unwrap();
        let decoded = from_value(&value).unwrap();

        // Both reservations navigate to the single decoded car.
        assert_eq!(decoded.cars().count(), 1);
        let ids: Vec<i32> = decoded.car_reservations(7).map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);

        // The second root is a reference to the object defined inside the car.
        let second_root = &value["$values"][1]["$ref"];
        let defined = &value["$values"][0]["car"]["reservations"]["$values"][1]["$id"];
        assert_eq!(second_root, defined);
    }

    #[test]
    fn test_plain_arrays_accepted() {
        let value = json!([serde_json::to_value(reservation(5, 1, 1)).unwrap()]);
        let decoded = from_value(&value).unwrap();
        assert_eq!(decoded.reservations(), &[reservation(5, 1, 1)]);
    }

    #[test]
    fn test_dangling_reference_rejected() {
        let value = json!({ "$id": "1", "$values": [{ "$ref": "9" }] });
        let err = from_value(&value).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m.contains("\"9\"")));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let node = serde_json::to_value(reservation(1, 1, 1)).unwrap();
        let mut a = node.clone();
        a["$id"] = json!("2");
        let mut b = node;
        b["$id"] = json!("2");
        let value = json!({ "$id": "1", "$values": [a, b] });
        assert!(from_value(&value).is_err());
    }

    #[test]
    fn test_empty_graph() {
        let value = to_value(&ReservationGraph::default()).unwrap();
        assert_eq!(value, json!({ "$id": "1", "$values": [] }));
        assert!(from_value(&value).unwrap().is_empty());
    }
}
