//! Pipeline tests against a scripted encyclopedia client.

mod resolver_flow;
