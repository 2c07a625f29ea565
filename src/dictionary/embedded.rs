use serde_json::{
    Value,
    json,
};

use super::Dictionary;
use crate::language::Language;

/// Built-in dictionary for a language.
///
/// Must cover every key the embedded sidebar template uses.
#[must_use]
pub fn embedded(language: Language) -> Dictionary {
    let value = match language {
        Language::Hy => armenian(),
        Language::En => english(),
        Language::Ru => russian(),
    };
    Dictionary::from_value(value).unwrap_or_default()
}

/// Armenian strings.
fn armenian() -> Value {
    json!({
        "nav": {
            "title": "Անշարժ գույքի կառավարում",
            "dashboard": "Գլխավոր էջ",
            "customers": "Հաճախորդներ",
            "properties": "Գույքեր",
            "employees": "Աշխատակիցներ",
            "maintenance": "Նորոգում",
            "finances": "Ֆինանսներ",
            "settings": "Կարգավորումներ",
            "toggle": "Փոխել կողային վահանակը"
        },
        "dashboard": {
            "title": "Գլխավոր էջ",
            "subtitle": "Բարի գալուստ! Ահա թե ինչ է կատարվում ձեր գույքի հետ:",
            "theme": "Թեմա"
        },
        "stats": {
            "totalProperty": "Ընդհանուր գույքեր",
            "occupiedApartments": "Զբաղված բնակարաններ",
            "monthlyIncome": "Ամսական եկամուտ",
            "maintenanceRequests": "Նորոգման հարցումներ"
        },
        "content": {
            "recentProperties": "Վերջին գույքեր",
            "recentActivity": "Վերջին գործունեություն",
            "propertyStatus": {
                "occupied": "Զբաղված",
                "available": "Հասանելի",
                "maintenance": "Նորոգում"
            }
        },
        "activity": {
            "newTenant": "Նոր վարձակալ տեղափոխվեց A1 բնակարան",
            "maintenanceRequest": "Նորոգման հարցում C2 բնակարանի համար",
            "rentPayment": "Վարձավճար ստացվեց B3 բնակարանից",
            "inspectionCompleted": "Գույքի ստուգում ավարտված է",
            "listingPublished": "Նոր գույքի հայտարարություն հրապարակված է"
        },
        "time": {
            "hoursAgo": "ժամ առաջ",
            "daysAgo": "օր առաջ"
        },
        "user": {
            "name": "Ադմինիստրատոր",
            "role": "Ադմինիստրատոր"
        }
    })
}

/// English strings.
fn english() -> Value {
    json!({
        "nav": {
            "title": "Property Management",
            "dashboard": "Dashboard",
            "customers": "Customers",
            "properties": "Properties",
            "employees": "Employees",
            "maintenance": "Maintenance",
            "finances": "Finances",
            "settings": "Settings",
            "toggle": "Toggle sidebar"
        },
        "dashboard": {
            "title": "Dashboard",
            "subtitle": "Welcome! Here's what's happening with your property:",
            "theme": "Theme"
        },
        "stats": {
            "totalProperty": "Total Property",
            "occupiedApartments": "Occupied Apartments",
            "monthlyIncome": "Monthly Income",
            "maintenanceRequests": "Maintenance Requests"
        },
        "content": {
            "recentProperties": "Recent Properties",
            "recentActivity": "Recent Activity",
            "propertyStatus": {
                "occupied": "Occupied",
                "available": "Available",
                "maintenance": "Maintenance"
            }
        },
        "activity": {
            "newTenant": "New tenant moved into A1 apartment",
            "maintenanceRequest": "Maintenance request for C2 apartment",
            "rentPayment": "Rent received from B3 apartment",
            "inspectionCompleted": "Property inspection completed",
            "listingPublished": "New property listing published"
        },
        "time": {
            "hoursAgo": "hours ago",
            "daysAgo": "days ago"
        },
        "user": {
            "name": "Admin User",
            "role": "Administrator"
        }
    })
}

/// Russian strings.
fn russian() -> Value {
    json!({
        "nav": {
            "title": "Управление недвижимостью",
            "dashboard": "Панель управления",
            "customers": "Клиенты",
            "properties": "Недвижимость",
            "employees": "Сотрудники",
            "maintenance": "Обслуживание",
            "finances": "Финансы",
            "settings": "Настройки",
            "toggle": "Свернуть боковую панель"
        },
        "dashboard": {
            "title": "Панель управления",
            "subtitle": "Добро пожаловать! Вот что происходит с вашей недвижимостью:",
            "theme": "Тема"
        },
        "stats": {
            "totalProperty": "Всего объектов",
            "occupiedApartments": "Занятые квартиры",
            "monthlyIncome": "Месячный доход",
            "maintenanceRequests": "Заявки на обслуживание"
        },
        "content": {
            "recentProperties": "Последние объекты",
            "recentActivity": "Последняя активность",
            "propertyStatus": {
                "occupied": "Занят",
                "available": "Доступен",
                "maintenance": "Обслуживание"
            }
        },
        "activity": {
            "newTenant": "Новый арендатор въехал в квартиру A1",
            "maintenanceRequest": "Заявка на обслуживание квартиры C2",
            "rentPayment": "Получена арендная плата за квартиру B3",
            "inspectionCompleted": "Осмотр недвижимости завершен",
            "listingPublished": "Опубликовано новое объявление о недвижимости"
        },
        "time": {
            "hoursAgo": "часов назад",
            "daysAgo": "дней назад"
        },
        "user": {
            "name": "Администратор",
            "role": "Администратор"
        }
    })
}
