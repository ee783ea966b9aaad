use async_graphql::MergedObject;

use crate::gql::domains::answers::AnswerQuery;
use crate::gql::domains::clues::ClueQuery;
use crate::gql::domains::games::GameQuery;

#[derive(MergedObject, Default)]
pub struct QueryRoot(AnswerQuery, ClueQuery, GameQuery);
