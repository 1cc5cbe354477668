use serde_json::{json, Value};

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn book_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/Book" }
            }
        }
    })
}

fn id_parameter() -> Value {
    json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int64", "minimum": 1 }
    })
}

fn enum_schema(values: &[&str]) -> Value {
    json!({ "type": "string", "enum": values })
}

fn optional_score(description: &str) -> Value {
    json!({
        "type": ["number", "null"],
        "minimum": 1,
        "maximum": 10,
        "multipleOf": 0.25,
        "description": description
    })
}

/// OpenAPI fragment for the books module; paths are relative to `/api/books`.
pub fn fragment() -> Value {
    let reading_statuses = ["READ", "WANT_TO_READ", "WANT_TO_READ_OWN", "CURRENTLY_READING"];
    let lending_statuses = ["ON_SHELF", "LENT_OUT"];

    let book_fields = json!({
        "title": { "type": "string", "description": "Title of the book" },
        "author": { "type": "string", "description": "Author of the book" },
        "description": { "type": ["string", "null"] },
        "rating": {
            "type": ["string", "null"],
            "description": "DNF, or 1–5 in .25 steps"
        },
        "detailedRating": {
            "oneOf": [
                { "$ref": "#/components/schemas/DetailedRating" },
                { "type": "null" }
            ]
        },
        "readingStatus": enum_schema(&reading_statuses),
        "isbn": { "type": ["string", "null"] },
        "year": { "type": ["integer", "null"] }
    });

    let mut book_properties = book_fields.clone();
    book_properties["id"] = json!({ "type": "integer", "format": "int64" });
    book_properties["calculatedStars"] = json!({
        "type": ["number", "null"],
        "description": "Stars derived from the detailed rating"
    });
    book_properties["lendingStatus"] = enum_schema(&lending_statuses);
    book_properties["lentTo"] = json!({ "type": ["string", "null"] });

    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "List books",
                    "tags": ["Books"],
                    "parameters": [
                        {
                            "name": "author",
                            "in": "query",
                            "required": false,
                            "description": "Case-insensitive author substring",
                            "schema": { "type": "string" }
                        },
                        {
                            "name": "status",
                            "in": "query",
                            "required": false,
                            "schema": enum_schema(&lending_statuses)
                        },
                        {
                            "name": "readingStatus",
                            "in": "query",
                            "required": false,
                            "schema": enum_schema(&reading_statuses)
                        }
                    ],
                    "responses": {
                        "200": {
                            "description": "Matching books",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/Book" }
                                    }
                                }
                            }
                        }
                    }
                },
                "post": {
                    "summary": "Add a book",
                    "tags": ["Books"],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/BookFields" }
                            }
                        }
                    },
                    "responses": {
                        "201": book_response("Created book"),
                        "422": error_response("Invalid rating or blank field")
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Books health check",
                    "tags": ["Books"],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": {
                                "text/plain": { "schema": { "type": "string" } }
                            }
                        }
                    }
                }
            },
            "/{id}": {
                "parameters": [id_parameter()],
                "get": {
                    "summary": "Get a book",
                    "tags": ["Books"],
                    "responses": {
                        "200": book_response("The book"),
                        "404": error_response("Book not found")
                    }
                },
                "put": {
                    "summary": "Replace every editable field of a book",
                    "tags": ["Books"],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/BookFields" }
                            }
                        }
                    },
                    "responses": {
                        "200": book_response("Updated book"),
                        "404": error_response("Book not found"),
                        "422": error_response("Invalid rating or blank field")
                    }
                },
                "delete": {
                    "summary": "Remove a book",
                    "tags": ["Books"],
                    "responses": {
                        "204": { "description": "Removed" },
                        "404": error_response("Book not found")
                    }
                }
            },
            "/{id}/lend": {
                "parameters": [id_parameter()],
                "post": {
                    "summary": "Lend a book",
                    "tags": ["Books"],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/LendRequest" }
                            }
                        }
                    },
                    "responses": {
                        "200": book_response("Book is lent out"),
                        "404": error_response("Book not found"),
                        "409": error_response("Book is already lent out")
                    }
                }
            },
            "/{id}/return": {
                "parameters": [id_parameter()],
                "post": {
                    "summary": "Return a book to the shelf",
                    "tags": ["Books"],
                    "responses": {
                        "200": book_response("Book is on the shelf"),
                        "404": error_response("Book not found")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": book_properties,
                    "required": ["id", "title", "author", "readingStatus", "lendingStatus"]
                },
                "BookFields": {
                    "type": "object",
                    "properties": book_fields,
                    "required": ["title", "author", "readingStatus"]
                },
                "DetailedRating": {
                    "type": "object",
                    "properties": {
                        "character": optional_score("Characters"),
                        "plot": optional_score("Plot"),
                        "writing": optional_score("Writing"),
                        "worldBuilding": optional_score("World building"),
                        "enjoyment": optional_score("Enjoyment"),
                        "comment": { "type": ["string", "null"] }
                    }
                },
                "LendRequest": {
                    "type": "object",
                    "properties": {
                        "lentTo": { "type": "string", "description": "Borrower name" }
                    },
                    "required": ["lentTo"]
                }
            }
        }
    })
}
