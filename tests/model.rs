use rand::*;
use smallany::{SmallAny, StorageOrigin, TypeTag};

#[derive(Clone, Debug, PartialEq)]
enum Model {
    Int(i32),
    Text(String),
    Big([u64; 6]),
    List(Vec<u16>),
}

fn random_model(rand: &mut impl Rng) -> Model {
    match rand.gen_range(0..4) {
        0 => Model::Int(rand.gen()),
        1 => Model::Text(rand.gen::<u32>().to_string()),
        2 => Model::Big(core::array::from_fn(|_| rand.gen())),
        _ => Model::List((0..rand.gen_range(0..8)).map(|_| rand.gen()).collect()),
    }
}

fn store(model: &Model) -> SmallAny {
    match model.clone() {
        Model::Int(v) => SmallAny::new(v),
        Model::Text(v) => SmallAny::new(v),
        Model::Big(v) => SmallAny::new(v),
        Model::List(v) => SmallAny::new(v),
    }
}

fn assert_matches(holder: &SmallAny, model: &Option<Model>) {
    match model {
        None => {
            assert!(!holder.has_value());
            assert_eq!(holder.type_tag(), TypeTag::empty());
            assert_eq!(holder.origin(), None);
            assert_eq!(holder.downcast_ref::<i32>(), None);
        }
        Some(Model::Int(v)) => {
            assert_eq!(holder.downcast_ref::<i32>(), Some(v));
            assert_eq!(holder.downcast_ref::<String>(), None);
            assert_eq!(holder.origin(), Some(StorageOrigin::Inline));
        }
        Some(Model::Text(v)) => {
            assert_eq!(holder.downcast_ref::<String>(), Some(v));
            assert_eq!(holder.downcast_ref::<Vec<u16>>(), None);
            assert_eq!(holder.origin(), Some(StorageOrigin::Inline));
        }
        Some(Model::Big(v)) => {
            assert_eq!(holder.downcast_ref::<[u64; 6]>(), Some(v));
            assert_eq!(holder.downcast_ref::<i32>(), None);
            assert_eq!(holder.origin(), Some(StorageOrigin::Heap));
        }
        Some(Model::List(v)) => {
            assert_eq!(holder.downcast_ref::<Vec<u16>>(), Some(v));
            assert_eq!(holder.downcast_ref::<[u64; 6]>(), None);
            assert_eq!(holder.origin(), Some(StorageOrigin::Inline));
        }
    }
}

fn take_model(holder: &mut SmallAny, model: &Model) -> Model {
    match model {
        Model::Int(_) => Model::Int(holder.take_value().unwrap()),
        Model::Text(_) => Model::Text(holder.take_value().unwrap()),
        Model::Big(_) => Model::Big(holder.take_value().unwrap()),
        Model::List(_) => Model::List(holder.take_value().unwrap()),
    }
}

#[test]
fn doppelganger() {
    let ops = 20000;

    let mut rand = thread_rng();
    let mut holders = [SmallAny::empty(), SmallAny::empty()];
    let mut doppelgangers: [Option<Model>; 2] = [None, None];

    for _ in 0..ops {
        let i = rand.gen_range(0..2);
        match rand.gen_range(0..10) {
            // Assign
            0 | 1 | 2 => {
                let model = random_model(&mut rand);
                holders[i] = store(&model);
                doppelgangers[i] = Some(model);
            }
            // Reset
            3 => {
                holders[i].reset();
                doppelgangers[i] = None;
            }
            // Swap
            4 => {
                let [a, b] = &mut holders;
                a.swap(b);
                doppelgangers.swap(0, 1);
            }
            // Clone over the other one
            5 => {
                holders[1 - i] = holders[i].clone();
                doppelgangers[1 - i] = doppelgangers[i].clone();
            }
            // Move out, leaving empty
            6 => {
                holders[1 - i] = holders[i].take();
                doppelgangers[1 - i] = doppelgangers[i].take();
            }
            // Take value
            7 => {
                if let Some(model) = doppelgangers[i].take() {
                    assert_eq!(take_model(&mut holders[i], &model), model);
                } else {
                    assert!(holders[i].take_value::<i32>().is_err());
                }
            }
            // Mutate in place
            8 => match &mut doppelgangers[i] {
                Some(Model::Int(v)) => {
                    *v = v.wrapping_add(1);
                    let stored = holders[i].cast_mut::<i32>().unwrap();
                    *stored = stored.wrapping_add(1);
                }
                Some(Model::Big(v)) => {
                    v[0] ^= 1;
                    holders[i].cast_mut::<[u64; 6]>().unwrap()[0] ^= 1;
                }
                Some(Model::List(v)) => {
                    v.push(7);
                    holders[i].cast_mut::<Vec<u16>>().unwrap().push(7);
                }
                Some(Model::Text(v)) => {
                    v.push('.');
                    holders[i].cast_mut::<String>().unwrap().push('.');
                }
                None => assert!(holders[i].cast_mut::<String>().is_err()),
            },
            // Swap twice is identity
            9 => {
                let [a, b] = &mut holders;
                a.swap(b);
                b.swap(a);
            }
            _ => (),
        }

        assert_matches(&holders[0], &doppelgangers[0]);
        assert_matches(&holders[1], &doppelgangers[1]);
    }
}
