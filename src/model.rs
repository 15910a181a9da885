//! Person records and their XML mapping.
//!
//! Every field is optional: a field missing from its row stays `None` and the
//! matching XML element is left out.

use crate::row::Row;
use crate::xml::XmlElement;

/// Street address, from an `A|street|city|zip` row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
}

impl Address {
    pub fn from_row(row: &Row) -> Self {
        Address {
            street: row.field_owned(0),
            city: row.field_owned(1),
            zip: row.field_owned(2),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("address");
        add_optional(&mut element, "street", &self.street);
        add_optional(&mut element, "city", &self.city);
        add_optional(&mut element, "zip", &self.zip);
        element
    }
}

/// Phone numbers, from a `T|mobile|landline` row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Phone {
    pub mobile: Option<String>,
    pub landline: Option<String>,
}

impl Phone {
    pub fn from_row(row: &Row) -> Self {
        Phone {
            mobile: row.field_owned(0),
            landline: row.field_owned(1),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("phone");
        add_optional(&mut element, "mobile", &self.mobile);
        add_optional(&mut element, "landline", &self.landline);
        element
    }
}

/// The address and phone slots every individual has.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    pub address: Option<Address>,
    pub phone: Option<Phone>,
}

impl Contact {
    fn append_to(&self, element: &mut XmlElement) {
        if let Some(address) = &self.address {
            element.add_child(address.to_xml());
        }
        if let Some(phone) = &self.phone {
            element.add_child(phone.to_xml());
        }
    }
}

/// A family member, from an `F|firstname|born` row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyMember {
    pub first_name: Option<String>,
    pub born: Option<String>,
    pub contact: Contact,
}

impl FamilyMember {
    pub fn from_row(row: &Row) -> Self {
        FamilyMember {
            first_name: row.field_owned(0),
            born: row.field_owned(1),
            contact: Contact::default(),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("family");
        add_optional(&mut element, "firstname", &self.first_name);
        add_optional(&mut element, "born", &self.born);
        self.contact.append_to(&mut element);
        element
    }
}

/// A person, from a `P|firstname|lastname` row, with everything attached to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub contact: Contact,
    pub family: Vec<FamilyMember>,
}

impl Person {
    pub fn from_row(row: &Row) -> Self {
        Person {
            first_name: row.field_owned(0),
            last_name: row.field_owned(1),
            contact: Contact::default(),
            family: Vec::new(),
        }
    }

    /// Builds the `<person>` element: names, address, phone, then one
    /// `<family>` per member in the order they were added.
    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("person");
        add_optional(&mut element, "firstname", &self.first_name);
        add_optional(&mut element, "lastname", &self.last_name);
        self.contact.append_to(&mut element);
        for member in &self.family {
            element.add_child(member.to_xml());
        }
        element
    }
}

fn add_optional(element: &mut XmlElement, name: &str, value: &Option<String>) {
    if let Some(value) = value {
        element.add_child_value(name, value.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(line: &str) -> Row {
        Row::parse(line).unwrap()
    }

    #[test]
    fn test_person_from_row() {
        let person = Person::from_row(&row("P|Elof|Sundin|ignored"));
        assert_eq!(person.first_name.as_deref(), Some("Elof"));
        assert_eq!(person.last_name.as_deref(), Some("Sundin"));
        assert!(person.family.is_empty());
        assert_eq!(person.contact, Contact::default());
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let member = FamilyMember::from_row(&row("F|Hans"));
        assert_eq!(
            member.to_xml().to_xml_string(0, 2),
            "<family>\n  <firstname>Hans</firstname>\n</family>\n"
        );
    }

    #[test]
    fn test_partial_address() {
        let address = Address::from_row(&row("A|10 Downing Street|London"));
        assert_eq!(address.zip, None);
        let xml = address.to_xml();
        assert!(xml.child("street").is_some());
        assert!(xml.child("city").is_some());
        assert!(xml.child("zip").is_none());
    }

    #[test]
    fn test_person_element_order() {
        let mut person = Person::from_row(&row("P|Elof|Sundin"));
        person.contact.phone = Some(Phone::from_row(&row("T|073-101801|018-101801")));
        person.contact.address = Some(Address::from_row(&row(
            "A|S:t Johannesgatan 16|Uppsala|75330",
        )));
        person.family.push(FamilyMember::from_row(&row("F|Hans|1967")));
        person.family.push(FamilyMember::from_row(&row("F|Anna|1969")));

        let xml = person.to_xml();
        let names: Vec<&str> = xml.elements().map(XmlElement::name).collect();
        assert_eq!(
            names,
            ["firstname", "lastname", "address", "phone", "family", "family"]
        );
    }

    #[test]
    fn test_reserialization_is_identical() {
        let mut person = Person::from_row(&row("P|Boris|Johnson"));
        person.contact.address = Some(Address::from_row(&row("A|10 Downing Street|London")));

        assert_eq!(person.to_xml().to_xml_string(1, 2), person.to_xml().to_xml_string(1, 2));
    }
}
