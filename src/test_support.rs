//! Record builders shared by the unit tests

use crate::model::{Address, Album, Catalog, Company, Geo, Photo, User};

pub fn user(id: i64, email: &str) -> User {
    User {
        id,
        name: "Leanne Graham".to_string(),
        username: "Bret".to_string(),
        email: email.to_string(),
        address: Address {
            street: "Kulas Light".to_string(),
            suite: "Apt. 556".to_string(),
            city: "Gwenborough".to_string(),
            zipcode: "92998-3874".to_string(),
            geo: Geo {
                lat: "-37.3159".to_string(),
                lng: "81.1496".to_string(),
            },
        },
        phone: "1-770-736-8031 x56442".to_string(),
        website: "hildegard.org".to_string(),
        company: Company {
            name: "Romaguera-Crona".to_string(),
            catch_phrase: "Multi-layered client-server neural-net".to_string(),
            bs: "harness real-time e-markets".to_string(),
        },
    }
}

pub fn album(id: i64, user_id: i64, title: &str) -> Album {
    Album {
        user_id,
        id,
        title: title.to_string(),
    }
}

pub fn photo(id: i64, album_id: i64, title: &str) -> Photo {
    Photo {
        album_id,
        id,
        title: title.to_string(),
        url: format!("https://via.placeholder.com/600/{id}"),
        thumbnail_url: format!("https://via.placeholder.com/150/{id}"),
    }
}

/// One user, one album, one photo
pub fn single_catalog() -> Catalog {
    Catalog {
        users: vec![user(1, "Sincere@april.biz")],
        albums: vec![album(1, 1, "quidem molestiae enim")],
        photos: vec![photo(1, 1, "accusamus beatae ad facilis cum similique qui sunt")],
    }
}
