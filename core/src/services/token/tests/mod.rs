//! Tests for the token lifecycle services
