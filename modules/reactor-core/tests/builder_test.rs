//! ReactionBuilder: persistent registration across every handler form.

use std::sync::Arc;

use reactor_core::{Message, MessageType, Reaction, ReactionBuilder, ReactionComposer, ReactionHandler};

fn outputs(reaction: &Reaction, index: usize, message: Message) -> Vec<Message> {
    reaction.handlers()[index].handle(&message).unwrap()
}

fn ints(messages: &[Message]) -> Vec<i32> {
    messages
        .iter()
        .map(|m| *m.downcast_ref::<i32>().expect("i32 message"))
        .collect()
}

// =========================================================================
// Construction
// =========================================================================

#[test]
fn new_builder_builds_an_empty_reaction() {
    let reaction = ReactionBuilder::new().build();
    assert!(reaction.is_empty());
}

#[test]
fn seeded_builder_round_trips_the_reaction() {
    let first = ReactionHandler::of(|_: &i32| Ok(Vec::new()));
    let second = ReactionHandler::of(|_: &i32| Ok(Vec::new()));
    let reaction = Reaction::new(vec![first.clone(), second.clone()]);

    let rebuilt = ReactionBuilder::from_reaction(&reaction).build();

    assert_eq!(rebuilt.len(), 2);
    assert!(Arc::ptr_eq(rebuilt.handlers()[0].handler(), first.handler()));
    assert!(Arc::ptr_eq(rebuilt.handlers()[1].handler(), second.handler()));
}

#[test]
fn seeded_builder_does_not_alias_the_reaction() {
    let reaction = ReactionBuilder::new().when(|n: &i32| *n).build();

    let extended = ReactionBuilder::from(&reaction).when(|n: &u8| *n).build();

    assert_eq!(reaction.len(), 1);
    assert_eq!(extended.len(), 2);
}

#[test]
fn build_is_repeatable() {
    let builder = ReactionBuilder::new().when(|n: &i32| *n);

    assert_eq!(builder.build().len(), 1);
    assert_eq!(builder.build().len(), 1);
}

// =========================================================================
// Persistence
// =========================================================================

#[test]
fn when_leaves_the_receiver_unchanged() {
    let base = ReactionBuilder::new();
    let next = base.when(|n: &i32| n + 1);

    assert!(base.is_empty());
    assert_eq!(next.len(), 1);
}

#[test]
fn branches_from_a_shared_base_are_independent() {
    let base = ReactionBuilder::new().when(|n: &i32| n + 1);

    let left = base.when(|s: &String| s.len());
    let right = base.when_many(|b: &bool| vec![Message::new(!*b)]);

    assert_eq!(base.len(), 1);
    assert_eq!(
        left.message_types().collect::<Vec<_>>(),
        vec![MessageType::of::<i32>(), MessageType::of::<String>()]
    );
    assert_eq!(
        right.message_types().collect::<Vec<_>>(),
        vec![MessageType::of::<i32>(), MessageType::of::<bool>()]
    );
}

// =========================================================================
// Handler forms
// =========================================================================

#[test]
fn when_wraps_a_single_message() {
    let reaction = ReactionBuilder::new().when(|n: &i32| n + 1).build();

    assert_eq!(reaction.handlers()[0].message_type(), MessageType::of::<i32>());
    assert_eq!(ints(&outputs(&reaction, 0, Message::new(1_i32))), vec![2]);
}

#[test]
fn when_returning_a_container_yields_one_message_of_that_type() {
    let reaction = ReactionBuilder::new()
        .when(|n: &i32| vec![Message::new(*n), Message::new(n + 1)])
        .build();

    let output = outputs(&reaction, 0, Message::new(1_i32));
    assert_eq!(output.len(), 1);
    assert!(output[0].is::<Vec<Message>>());

    let spread = ReactionBuilder::new()
        .when_many(|n: &i32| vec![Message::new(*n), Message::new(n + 1)])
        .build();
    assert_eq!(ints(&outputs(&spread, 0, Message::new(1_i32))), vec![1, 2]);
}

#[test]
fn when_returning_a_message_does_not_nest_it() {
    let reaction = ReactionBuilder::new()
        .when(|n: &i32| Message::new(n.to_string()))
        .build();

    let output = outputs(&reaction, 0, Message::new(7_i32));
    assert_eq!(output.len(), 1);
    assert_eq!(output[0].downcast_ref::<String>().map(String::as_str), Some("7"));
}

#[test]
fn when_many_accepts_arrays() {
    let reaction = ReactionBuilder::new()
        .when_many(|n: &i32| [Message::new(*n), Message::new(n * 10)])
        .build();

    assert_eq!(ints(&outputs(&reaction, 0, Message::new(3_i32))), vec![3, 30]);
}

#[test]
fn when_many_accepts_vectors_and_composers() {
    let reaction = ReactionBuilder::new()
        .when_many(|n: &i32| vec![Message::new(n + 1)])
        .when_many(|n: &i32| ReactionComposer::new().compose(n + 2).compose(n + 3))
        .build();

    assert_eq!(ints(&outputs(&reaction, 0, Message::new(0_i32))), vec![1]);
    assert_eq!(ints(&outputs(&reaction, 1, Message::new(0_i32))), vec![2, 3]);
}

#[test]
fn when_iter_accepts_lazy_sequences() {
    let reaction = ReactionBuilder::new()
        .when_iter(|n: &i32| (0..*n).map(Message::new))
        .build();

    assert_eq!(
        ints(&outputs(&reaction, 0, Message::new(4_i32))),
        vec![0, 1, 2, 3]
    );
    assert!(outputs(&reaction, 0, Message::new(0_i32)).is_empty());
}

#[test]
fn try_when_propagates_handler_errors() {
    let reaction = ReactionBuilder::new()
        .try_when(|n: &i32| {
            if *n < 0 {
                anyhow::bail!("negative: {n}");
            }
            Ok(vec![Message::new(*n)])
        })
        .build();

    let handler = &reaction.handlers()[0];
    assert_eq!(ints(&handler.handle(&Message::new(5_i32)).unwrap()), vec![5]);

    let err = handler.handle(&Message::new(-1_i32)).unwrap_err();
    assert_eq!(err.to_string(), "negative: -1");
}

#[test]
fn mixed_forms_preserve_registration_order() {
    let prebuilt = ReactionHandler::of(|_: &char| Ok(Vec::new()));
    let reaction = ReactionBuilder::new()
        .when(|n: &i32| *n)
        .when_many(|s: &String| vec![Message::new(s.clone())])
        .when_iter(|b: &bool| std::iter::once(Message::new(*b)))
        .try_when(|n: &u64| Ok(vec![Message::new(*n)]))
        .with_handler(prebuilt)
        .when(|n: &i32| -n)
        .build();

    let types: Vec<MessageType> = reaction
        .handlers()
        .iter()
        .map(ReactionHandler::message_type)
        .collect();
    assert_eq!(
        types,
        vec![
            MessageType::of::<i32>(),
            MessageType::of::<String>(),
            MessageType::of::<bool>(),
            MessageType::of::<u64>(),
            MessageType::of::<char>(),
            MessageType::of::<i32>(),
        ]
    );
}
