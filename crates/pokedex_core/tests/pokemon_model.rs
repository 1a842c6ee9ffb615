use pokedex_core::{Pokemon, PokemonField, PokemonValidationError, ValueType};
use serde_json::json;

#[test]
fn info_contains_all_valid_values_verbatim() {
    let cases = [
        ("Pikachu", "Electric", json!(10)),
        ("Bulbasaur", "Grass", json!(1)),
        ("Mewtwo", "Psychic", json!(70.5)),
        ("", "", json!(0)),
    ];

    for (name, kind, level) in cases {
        let pokemon = Pokemon::new(name, kind, level.clone());
        let info = pokemon.info();
        assert!(info.contains(name), "{info}");
        assert!(info.contains(kind), "{info}");
        assert!(info.contains(&level.to_string()), "{info}");
        assert!(pokemon.is_complete());
    }
}

#[test]
fn mistyped_setter_input_leaves_field_unset() {
    let mut pokemon = Pokemon::new(json!(25), json!(true), "ten");

    assert_eq!(pokemon.name(), None);
    assert_eq!(pokemon.kind(), None);
    assert_eq!(pokemon.level(), None);

    pokemon.set_name(json!(["Pika"]));
    pokemon.set_kind(json!({"t": "Electric"}));
    pokemon.set_level(json!(null));
    assert_eq!(pokemon, Pokemon::default());
}

#[test]
fn rejected_setter_keeps_previous_value() {
    let mut pokemon = Pokemon::new("Pikachu", "Electric", 10);

    pokemon.set_name(99);
    pokemon.set_level("eleven");

    assert_eq!(pokemon.name(), Some("Pikachu"));
    assert_eq!(pokemon.level().and_then(|level| level.as_i64()), Some(10));
}

#[test]
fn partially_populated_record_reports_first_missing_field() {
    let pokemon = Pokemon::new("Snorlax", 143, 30);

    assert!(!pokemon.is_complete());
    assert_eq!(
        pokemon.validate().unwrap_err(),
        PokemonValidationError::MissingField(PokemonField::Kind)
    );
    assert_eq!(pokemon.info(), "name: Snorlax, type: undefined, level: 30");
}

#[test]
fn try_new_rejects_mistyped_level() {
    let err = Pokemon::try_new("Pikachu", "Electric", "10").unwrap_err();
    assert_eq!(
        err,
        PokemonValidationError::InvalidField {
            field: PokemonField::Level,
            expected: ValueType::Number,
            found: ValueType::String,
        }
    );
    assert_eq!(err.to_string(), "level must be a number, got string");
}

#[test]
fn try_new_reports_first_failing_field_in_order() {
    let err = Pokemon::try_new(json!(null), 3, json!(false)).unwrap_err();
    assert_eq!(
        err,
        PokemonValidationError::InvalidField {
            field: PokemonField::Name,
            expected: ValueType::String,
            found: ValueType::Null,
        }
    );
}

#[test]
fn try_new_builds_complete_record() {
    let pokemon = Pokemon::try_new("Pikachu", "Electric", 10).unwrap();
    assert!(pokemon.is_complete());
    assert_eq!(pokemon.info(), "name: Pikachu, type: Electric, level: 10");
}

#[test]
fn non_finite_levels_are_rejected_as_null() {
    let pokemon = Pokemon::new("Pika", "Electric", f64::NAN);
    assert_eq!(pokemon.level(), None);
    assert_eq!(pokemon.info(), "name: Pika, type: Electric, level: undefined");

    let err = Pokemon::try_new("Pika", "Electric", f64::INFINITY).unwrap_err();
    assert_eq!(
        err,
        PokemonValidationError::InvalidField {
            field: PokemonField::Level,
            expected: ValueType::Number,
            found: ValueType::Null,
        }
    );
}
