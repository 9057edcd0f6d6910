use chrono::NaiveDate;
use fake::faker::lorem::en::Sentence;
use fake::{Fake, Faker};
use fintrack_repo::transaction_repo::NewTransaction;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;

#[allow(dead_code)]
pub fn new_transaction() -> NewTransaction {
    new_transaction_with_category(None)
}

#[allow(dead_code)]
pub fn new_transaction_with_category(category_id: Option<i32>) -> NewTransaction {
    let transaction_type = ["income", "expense"]
        .choose(&mut rand::thread_rng())
        .unwrap()
        .to_string();
    NewTransaction::new(
        transaction_type,
        Decimal::new(Faker.fake::<u16>() as i64, 2),
        Some(Sentence(3..8).fake()),
        Faker.fake::<NaiveDate>(),
        category_id,
    )
}
