// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use hashlink::LinkedHashMap;

use crate::value::{MultiMap, Value};

/// Request metadata harvested by the host when a failure is observed.
#[derive(Clone, Debug, Default)]
pub struct RequestInfo {
    route_path: Option<String>,
    route: Option<Value>,
    method: Option<String>,
    form: Option<MultiMap>,
    query_string: Option<MultiMap>,
}

impl RequestInfo {
    pub fn new() -> RequestInfo {
        RequestInfo::default()
    }

    pub fn route_path(mut self, route_path: impl Into<String>) -> Self {
        self.route_path = Some(route_path.into());
        self
    }

    /// Route values, usually a map of route parameter names to values.
    pub fn route(mut self, route: Value) -> Self {
        self.route = Some(route);
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn form(mut self, form: MultiMap) -> Self {
        self.form = Some(form);
        self
    }

    pub fn query_string(mut self, query_string: MultiMap) -> Self {
        self.query_string = Some(query_string);
        self
    }

    /// Builds the request map. Unset fields are left out.
    pub fn to_map(&self) -> LinkedHashMap<String, Value> {
        let mut map = LinkedHashMap::new();
        if let Some(route_path) = &self.route_path {
            map.insert("RoutePath".to_string(), Value::string(route_path.as_str()));
        }
        if let Some(route) = &self.route {
            map.insert("Route".to_string(), route.clone());
        }
        if let Some(method) = &self.method {
            map.insert("Method".to_string(), Value::string(method.as_str()));
        }
        if let Some(form) = &self.form {
            map.insert("Form".to_string(), Value::from(form.clone()));
        }
        if let Some(query_string) = &self.query_string {
            map.insert("QueryString".to_string(), Value::from(query_string.clone()));
        }
        map
    }
}
