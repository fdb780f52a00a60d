//! Snapshot tests for generated Python modules.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use zod2py_codegen_python::{GeneratedUnit, Generator};
use zod2py_schema::SchemaModule;

fn generate(json: &str, filename: &str) -> GeneratedUnit {
    let module =
        SchemaModule::from_str_with_filename(json, filename).expect("Failed to load module");
    Generator::new().generate(&module)
}

fn generate_code(json: &str, filename: &str) -> String {
    generate(json, filename)
        .code()
        .expect("Module should generate")
        .to_string()
}

#[test]
fn test_nested_objects_and_enum() {
    let code = generate_code(
        r#"{
            "default": {"kind": "object", "shape": {
                "name": {"kind": "string"},
                "members": {"kind": "array", "element": {"kind": "string"}},
                "description": {"kind": "literal", "value": "asd"},
                "user": {"kind": "object", "shape": {
                    "id": {"kind": "string"},
                    "joined": {"kind": "date"},
                    "role": {"kind": "enum", "values": ["admin", "member"]}
                }}
            }}
        }"#,
        "team.z2p.json",
    );

    insta::assert_snapshot!(code, @r##"
    ####################
    # Generated by zod2py
    # DO NOT MODIFY
    ####################
    from __future__ import annotations

    from typing import Literal
    from datetime import datetime
    from enum import Enum
    from dataclasses import dataclass


    @dataclass
    class Team:
        name: str
        members: list[str]
        description: Literal["asd"]
        user: TeamUser


    @dataclass
    class TeamUser:
        id: str
        joined: datetime
        role: TeamUserRole


    class TeamUserRole(Enum):
        admin = "admin"
        member = "member"
    "##);
}

#[test]
fn test_discriminated_union_and_aliases() {
    let code = generate_code(
        r#"{
            "event": {"kind": "discriminatedUnion", "discriminator": "type", "options": [
                {"kind": "object", "shape": {
                    "type": {"kind": "literal", "value": "click"},
                    "x": {"kind": "number"},
                    "y": {"kind": "number"}
                }},
                {"kind": "object", "shape": {
                    "type": {"kind": "literal", "value": "key"},
                    "key": {"kind": "string"},
                    "modifiers": {"kind": "optional", "inner": {"kind": "array", "element": {"kind": "string"}}}
                }}
            ]},
            "eventLog": {"kind": "record", "value": {"kind": "array", "element": {
                "kind": "object", "shape": {"at": {"kind": "date"}}
            }}}
        }"#,
        "events.z2p.json",
    );

    insta::assert_snapshot!(code, @r##"
    ####################
    # Generated by zod2py
    # DO NOT MODIFY
    ####################
    from __future__ import annotations

    from typing import Literal
    from dataclasses import dataclass
    from typing import Optional
    from typing import TypeAlias
    from datetime import datetime


    @dataclass
    class EventClick:
        type: Literal["click"]
        x: float
        y: float


    @dataclass
    class EventKey:
        type: Literal["key"]
        key: str
        modifiers: Optional[list[str]]


    @dataclass
    class EventLogA:
        at: datetime


    Event: TypeAlias = EventClick | EventKey
    EventLog: TypeAlias = dict[str, list[EventLogA]]
    "##);
}

#[test]
fn test_modifiers_and_unsupported_kinds() {
    let unit = generate(
        r#"{
            "default": {"kind": "object", "shape": {
                "id": {"kind": "branded", "inner": {"kind": "string"}},
                "tags": {"kind": "default", "inner": {"kind": "array", "element": {"kind": "string"}}, "value": []},
                "score": {"kind": "nullable", "inner": {"kind": "number"}},
                "point": {"kind": "tuple", "items": [{"kind": "number"}, {"kind": "number"}]},
                "value": {"kind": "union", "options": [{"kind": "string"}, {"kind": "number"}, {"kind": "null"}]},
                "meta": {"kind": "record", "value": {"kind": "unknown"}},
                "callback": {"kind": "function"},
                "pipe": {"kind": "pipeline", "in": {"kind": "string"}}
            }}
        }"#,
        "settings.z2p.json",
    );

    assert_eq!(unit.diagnostics.len(), 1);
    assert_eq!(unit.diagnostics[0].location.as_deref(), Some("Settings~pipe"));

    insta::assert_snapshot!(unit.code().unwrap(), @r##"
    ####################
    # Generated by zod2py
    # DO NOT MODIFY
    ####################
    from __future__ import annotations

    from typing import Optional
    from typing import Tuple
    from typing import Any
    from typing import Callable
    from dataclasses import dataclass


    @dataclass
    class Settings:
        id: str
        tags: list[str]
        score: Optional[float]
        point: Tuple[float, float]
        value: str | float | None
        meta: dict[str, Any]
        callback: Callable
        pipe: Any
    "##);
}

#[test]
fn test_native_enum_values_are_escaped() {
    let code = generate_code(
        r#"{"default": {"kind": "nativeEnum", "values": {"Low": 1, "High": "say \"hi\""}}}"#,
        "priority.z2p.json",
    );

    insta::assert_snapshot!(code, @r##"
    ####################
    # Generated by zod2py
    # DO NOT MODIFY
    ####################
    from __future__ import annotations

    from enum import Enum


    class Priority(Enum):
        Low = "1"
        High = "say \"hi\""
    "##);
}

#[test]
fn test_generation_is_deterministic() {
    let json = r#"{
        "user": {"kind": "object", "shape": {
            "profile": {"kind": "object", "shape": {"bio": {"kind": "string"}}},
            "status": {"kind": "enum", "values": ["active", "banned"]}
        }},
        "userProfile": {"kind": "discriminatedUnion", "discriminator": "kind", "options": [
            {"kind": "object", "shape": {"kind": {"kind": "null"}}},
            {"kind": "object", "shape": {"kind": {"kind": "string"}}}
        ]}
    }"#;
    let module = SchemaModule::from_str_with_filename(json, "users.z2p.json").unwrap();

    let mut generator = Generator::new();
    let first = generator.generate(&module);
    let second = generator.generate(&module);
    let fresh = Generator::new().generate(&module);

    assert_eq!(first.code(), second.code());
    assert_eq!(first.code(), fresh.code());
    assert!(
        first
            .code()
            .unwrap()
            .ends_with("UserProfile: TypeAlias = UserProfileNull | UserProfileKindB\n")
    );
}
